//! Audit sink port - fire-and-forget lead records for external logging.

use async_trait::async_trait;

use crate::domain::LeadRecord;

/// Port for the optional external audit/log sink.
///
/// Failures here are operational noise, never turn failures; the
/// dispatcher logs and swallows them.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Records one captured lead.
    async fn record(&self, lead: &LeadRecord) -> Result<(), AuditError>;
}

/// Errors from the audit sink.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// Sink rejected the record.
    #[error("audit sink rejected record with status {0}")]
    Rejected(u16),

    /// Transport-level failure.
    #[error("audit sink error: {0}")]
    Network(String),
}
