//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("No allowed origins configured for production")]
    NoAllowedOrigins,

    #[error("Rate limit window and capacity must be non-zero")]
    InvalidRateLimit,

    #[error("Conversation and message size bounds must be non-zero")]
    InvalidSizeBounds,

    #[error("Invalid Anthropic API key format")]
    InvalidAnthropicKey,

    #[error("Invalid completion token ceiling")]
    InvalidTokenCeiling,

    #[error("Invalid Resend API key format")]
    InvalidResendKey,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Invalid owner email address")]
    InvalidOwnerEmail,
}
