//! Email and audit sink adapters.

mod resend;
mod webhook_sink;

pub use resend::ResendMailer;
pub use webhook_sink::WebhookAuditSink;
