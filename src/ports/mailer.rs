//! Mailer port - outbound email transport.

use async_trait::async_trait;

/// One outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Formatted From header, e.g. `Studio <notifications@example.com>`.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Port for sending email notifications.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers one message. Implementations should not retry internally;
    /// the dispatcher decides what a failure means per channel.
    async fn send(&self, message: EmailMessage) -> Result<(), MailError>;
}

/// Errors from the mail transport.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Transport accepted the connection but rejected the message.
    #[error("mail rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Transport-level failure.
    #[error("mail transport error: {0}")]
    Network(String),
}
