//! Process-wide set of lead identities that already triggered dispatch.
//!
//! The set grows monotonically and is never pruned; it resets only on
//! process restart, which is the accepted at-most-once boundary for this
//! funnel. Owned and injected at construction rather than living in an
//! ambient global.

use std::collections::HashSet;
use std::sync::Mutex;

/// Claim set for notified lead identities (normalized emails).
///
/// Claiming is synchronous so a caller can mark an identity as taken
/// before starting any asynchronous dispatch. A second concurrent turn
/// for the same identity then observes the claim and skips.
#[derive(Debug, Default)]
pub struct NotifiedLeads {
    seen: Mutex<HashSet<String>>,
}

impl NotifiedLeads {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims an identity. Returns `true` if this call took the claim,
    /// `false` if the identity was already claimed.
    pub fn claim(&self, identity: &str) -> bool {
        self.lock().insert(identity.to_string())
    }

    /// Whether an identity has been claimed.
    pub fn contains(&self, identity: &str) -> bool {
        self.lock().contains(identity)
    }

    /// Number of claimed identities.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no identity has been claimed yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // A poisoned lock only means another thread panicked mid-insert;
        // the set itself stays usable.
        self.seen.lock().unwrap_or_else(|e| e.into_inner())
    }
}
