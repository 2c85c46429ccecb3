//! Scripted provider for tests: canned completions or forced failures,
//! with received requests recorded for assertions.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::ports::{AiError, AiProvider, CompletionRequest, CompletionResponse, StopReason};

/// Test double for [`AiProvider`].
#[derive(Debug, Default)]
pub struct MockProvider {
    replies: Mutex<VecDeque<String>>,
    fail: bool,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    /// Provider that answers every request with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        let mut replies = VecDeque::new();
        replies.push_back(reply.into());
        Self {
            replies: Mutex::new(replies),
            fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Provider that answers queued replies in order, then repeats the last.
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Provider that fails every request.
    pub fn failing() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fail: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of completion requests received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Snapshot of received requests.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl AiProvider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        if self.fail {
            return Err(AiError::unavailable("mock provider down"));
        }

        let mut replies = self.replies.lock().unwrap_or_else(|e| e.into_inner());
        let content = if replies.len() > 1 {
            replies.pop_front().unwrap_or_default()
        } else {
            replies.front().cloned().unwrap_or_default()
        };

        Ok(CompletionResponse {
            content,
            model: "mock".to_string(),
            stop_reason: StopReason::EndTurn,
        })
    }
}
