//! AI provider port - interface to the generative text backend.
//!
//! The dialogue driver sends an ordered turn sequence plus a system
//! instruction and receives one free-form completion. The completion may
//! embed a machine-readable lead block; that protocol is the extractor's
//! concern, not the provider's.

use async_trait::async_trait;

use crate::domain::ConversationTurn;

/// Port for generative backend interactions.
///
/// Implementations connect to an external LLM service and translate
/// between the provider-specific API and our domain types.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Generate a single completion for the given request.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError>;
}

/// Request for one completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation turns, oldest first.
    pub turns: Vec<ConversationTurn>,
    /// System instruction guiding model behavior. Never exposed to the caller.
    pub system_prompt: Option<String>,
    /// Completion length ceiling, bounds cost and latency.
    pub max_tokens: Option<u32>,
    /// Response randomness (0.0 = deterministic).
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a request for the given turn sequence.
    pub fn new(turns: Vec<ConversationTurn>) -> Self {
        Self {
            turns,
            system_prompt: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Sets the system instruction.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the completion token ceiling.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Response from a completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text.
    pub content: String,
    /// Model that produced it.
    pub model: String,
    /// Why generation stopped.
    pub stop_reason: StopReason,
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Natural end of the reply.
    EndTurn,
    /// Hit the token ceiling.
    MaxTokens,
}

/// Errors from the generative backend.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider-side rate limit.
    #[error("rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Request rejected as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider returned a server error.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Parse(String),
}

impl AiError {
    /// Network error constructor.
    pub fn network(msg: impl Into<String>) -> Self {
        AiError::Network(msg.into())
    }

    /// Unavailable error constructor.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        AiError::Unavailable(msg.into())
    }

    /// Parse error constructor.
    pub fn parse(msg: impl Into<String>) -> Self {
        AiError::Parse(msg.into())
    }

    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AiError::RateLimited { .. }
                | AiError::Unavailable(_)
                | AiError::Network(_)
                | AiError::Timeout { .. }
        )
    }
}
