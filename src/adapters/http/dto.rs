//! HTTP DTOs for the concierge endpoints.
//!
//! These types decouple the wire format from domain types.

use serde::{Deserialize, Serialize};

use crate::domain::{LeadRecord, RawTurn};

/// POST /api/chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Conversation so far, oldest first. Roles and content are
    /// untrusted at this point.
    #[serde(default)]
    pub messages: Vec<RawTurn>,
    /// Caller-tracked notification state for this session.
    #[serde(default)]
    pub notified: Option<bool>,
}

/// POST /api/chat response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Visible assistant reply.
    pub reply: String,
    /// Echoed notification state; absent when the caller sent none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified: Option<bool>,
}

/// POST /api/notify request body.
#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub lead: LeadRecord,
}

/// POST /api/notify response body.
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub success: bool,
}

/// GET /health response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Uniform error body for all non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Stable machine-readable reason code.
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}
