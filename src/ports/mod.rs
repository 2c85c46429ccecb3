//! Ports - interfaces to external collaborators.
//!
//! Each port is an `async_trait` trait with its own error enum. Adapters
//! in `crate::adapters` provide the concrete implementations.

mod ai_provider;
mod audit;
mod mailer;
mod rate_limiter;

pub use ai_provider::{AiError, AiProvider, CompletionRequest, CompletionResponse, StopReason};
pub use audit::{AuditError, AuditSink};
pub use mailer::{EmailMessage, MailError, Mailer};
pub use rate_limiter::{RateDecision, RateDenied, RateLimiter, RateStatus};
