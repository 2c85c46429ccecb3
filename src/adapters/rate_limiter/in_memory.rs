//! In-memory rate limiter for single-process deployments.
//!
//! Uses a fixed-window counter with an in-memory HashMap: the window
//! resets when it expires rather than sliding, an accepted approximation
//! for this low-volume funnel. State is process-local and lost on
//! restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::ports::{RateDecision, RateDenied, RateLimiter, RateStatus};

/// Fixed-window counter keyed by client identity.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    /// Requests admitted per window.
    limit: u32,
    /// Window duration in seconds.
    window_secs: u64,
    /// Per-client window state.
    windows: RwLock<HashMap<String, RateWindow>>,
}

/// State for a single client's window.
#[derive(Debug, Clone)]
struct RateWindow {
    /// Requests counted in the current window.
    count: u32,
    /// When the current window started, unix seconds.
    window_start: u64,
}

impl InMemoryRateLimiter {
    /// Creates a limiter admitting `limit` requests per `window_secs`.
    pub fn new(limit: u32, window_secs: u64) -> Self {
        Self {
            limit,
            window_secs,
            windows: RwLock::new(HashMap::new()),
        }
    }

    /// Checks a request against the window as of `now` (unix seconds).
    ///
    /// Separated from [`RateLimiter::check`] so window expiry is testable
    /// without waiting wall-clock time.
    pub async fn check_at(&self, client: &str, now: u64) -> RateDecision {
        let mut windows = self.windows.write().await;

        let state = windows.entry(client.to_string()).or_insert(RateWindow {
            count: 0,
            window_start: now,
        });

        // Expired window: start a fresh one
        if now >= state.window_start + self.window_secs {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= self.limit {
            let retry_after = (state.window_start + self.window_secs).saturating_sub(now) as u32;
            return RateDecision::Denied(RateDenied {
                limit: self.limit,
                retry_after_secs: retry_after.max(1),
            });
        }

        state.count += 1;
        RateDecision::Allowed(RateStatus {
            limit: self.limit,
            remaining: self.limit.saturating_sub(state.count),
            window_secs: self.window_secs,
        })
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, client: &str) -> RateDecision {
        self.check_at(client, Self::now_secs()).await
    }
}
