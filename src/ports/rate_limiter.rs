//! Rate limiting port - per-client admission throttling.
//!
//! The concierge partitions by client identity (forwarded address) only,
//! so the port keys on an opaque client string rather than a scoped key.

use async_trait::async_trait;

/// Port for rate limiting operations.
///
/// Implementations must be safe for concurrent access; the check is a
/// read-then-write on shared state and must not let concurrent requests
/// for the same client exceed the limit by more than a best-effort margin.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Checks whether a request from `client` is admissible, consuming
    /// one slot if so.
    async fn check(&self, client: &str) -> RateDecision;
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateDecision {
    /// Request admitted; includes current window status.
    Allowed(RateStatus),
    /// Request denied; includes retry guidance.
    Denied(RateDenied),
}

impl RateDecision {
    /// Returns true if the request was admitted.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed(_))
    }

    /// Returns true if the request was denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, RateDecision::Denied(_))
    }
}

/// Current window status after an admitted request.
#[derive(Debug, Clone)]
pub struct RateStatus {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the current window.
    pub remaining: u32,
    /// Window duration in seconds.
    pub window_secs: u64,
}

/// Details of a denial.
#[derive(Debug, Clone)]
pub struct RateDenied {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Seconds until the client should retry.
    pub retry_after_secs: u32,
}
