//! Dialogue driver - one completion per admitted turn, degraded to a
//! static fallback when the backend fails.
//!
//! The caller-facing contract prioritizes availability of some reply
//! over surfacing backend failures, so a provider error never becomes a
//! hard error here.

use std::sync::Arc;

use crate::application::script;
use crate::domain::ConversationTurn;
use crate::ports::{AiProvider, CompletionRequest};

/// Drives the scripted qualification dialogue.
pub struct DialogueDriver {
    provider: Arc<dyn AiProvider>,
    contact_email: String,
    max_tokens: u32,
}

/// The driver's answer for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverReply {
    /// Raw completion text, possibly containing a lead block.
    Completion(String),
    /// Static fallback after a backend failure. Never contains a block.
    Fallback(String),
}

impl DialogueDriver {
    /// Creates a driver over the given provider.
    pub fn new(provider: Arc<dyn AiProvider>, contact_email: String, max_tokens: u32) -> Self {
        Self {
            provider,
            contact_email,
            max_tokens,
        }
    }

    /// Sends the admitted turn sequence plus the behavioral script to
    /// the backend and returns its completion, or the fallback reply on
    /// any failure.
    pub async fn drive(&self, turns: &[ConversationTurn]) -> DriverReply {
        let request = CompletionRequest::new(turns.to_vec())
            .with_system_prompt(script::behavioral_script(&self.contact_email))
            .with_max_tokens(self.max_tokens);

        match self.provider.complete(request).await {
            Ok(response) => {
                if response.content.is_empty() {
                    tracing::warn!("backend returned empty completion, falling back");
                    DriverReply::Fallback(script::fallback_reply(&self.contact_email))
                } else {
                    DriverReply::Completion(response.content)
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "generative backend failed, falling back");
                DriverReply::Fallback(script::fallback_reply(&self.contact_email))
            }
        }
    }
}
