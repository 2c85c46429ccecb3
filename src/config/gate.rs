//! Admission gate configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Admission gate configuration (rate limiting and payload bounds)
#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    /// Rate limit window length in seconds
    #[serde(default = "default_window_secs")]
    pub rate_limit_window_secs: u64,

    /// Requests admitted per client per window
    #[serde(default = "default_max_requests")]
    pub rate_limit_max_requests: u32,

    /// Maximum number of turns accepted in one conversation payload
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// Maximum characters kept per turn after sanitization
    #[serde(default = "default_max_turn_chars")]
    pub max_turn_chars: usize,
}

impl GateConfig {
    /// Validate gate configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.rate_limit_window_secs == 0 || self.rate_limit_max_requests == 0 {
            return Err(ValidationError::InvalidRateLimit);
        }
        if self.max_turns == 0 || self.max_turn_chars == 0 {
            return Err(ValidationError::InvalidSizeBounds);
        }
        Ok(())
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            rate_limit_window_secs: default_window_secs(),
            rate_limit_max_requests: default_max_requests(),
            max_turns: default_max_turns(),
            max_turn_chars: default_max_turn_chars(),
        }
    }
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_requests() -> u32 {
    10
}

fn default_max_turns() -> usize {
    20
}

fn default_max_turn_chars() -> usize {
    1000
}
