//! Direct notification entry point: runs the dispatcher synchronously
//! for a caller-supplied lead and reports email-channel failures.

use std::sync::Arc;
use thiserror::Error;

use crate::application::dispatcher::{ChannelOutcome, NotificationDispatcher};
use crate::domain::LeadRecord;

/// Errors surfaced to the transport layer.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// At least one email channel failed. The audit channel never
    /// contributes to this.
    #[error("notification delivery failed")]
    DeliveryFailed,
}

/// Synchronous notification service over the shared dispatcher.
pub struct NotifyService {
    dispatcher: Arc<NotificationDispatcher>,
}

impl NotifyService {
    pub fn new(dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Dispatches all channels for the lead, awaiting the outcome.
    pub async fn notify(&self, lead: &LeadRecord) -> Result<(), NotifyError> {
        let report = self.dispatcher.dispatch(lead).await;

        if report.owner_alert == ChannelOutcome::Failed
            || report.auto_reply == ChannelOutcome::Failed
        {
            return Err(NotifyError::DeliveryFailed);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{EmailMessage, MailError, Mailer};
    use async_trait::async_trait;

    struct FlakyMailer {
        fail_to: String,
    }

    #[async_trait]
    impl Mailer for FlakyMailer {
        async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
            if message.to == self.fail_to {
                Err(MailError::Network("down".to_string()))
            } else {
                Ok(())
            }
        }
    }

    struct OkMailer;

    #[async_trait]
    impl Mailer for OkMailer {
        async fn send(&self, _message: EmailMessage) -> Result<(), MailError> {
            Ok(())
        }
    }

    fn lead() -> LeadRecord {
        LeadRecord {
            name: "Ada".to_string(),
            email: "ada@acme.com".to_string(),
            company: "Acme".to_string(),
            project: "CV rig".to_string(),
            budget: "$20k".to_string(),
            timeline: "2mo".to_string(),
            score: 11,
            summary: "fit".to_string(),
        }
    }

    fn service(mailer: Arc<dyn Mailer>) -> NotifyService {
        NotifyService::new(Arc::new(NotificationDispatcher::new(
            mailer,
            None,
            "Studio <n@studio.com>".to_string(),
            "hello@studio.com".to_string(),
        )))
    }

    #[tokio::test]
    async fn succeeds_when_email_channels_deliver() {
        assert!(service(Arc::new(OkMailer)).notify(&lead()).await.is_ok());
    }

    #[tokio::test]
    async fn fails_when_owner_alert_fails() {
        let svc = service(Arc::new(FlakyMailer {
            fail_to: "hello@studio.com".to_string(),
        }));
        assert!(matches!(
            svc.notify(&lead()).await,
            Err(NotifyError::DeliveryFailed)
        ));
    }

    #[tokio::test]
    async fn fails_when_auto_reply_fails() {
        let svc = service(Arc::new(FlakyMailer {
            fail_to: "ada@acme.com".to_string(),
        }));
        assert!(matches!(
            svc.notify(&lead()).await,
            Err(NotifyError::DeliveryFailed)
        ));
    }

    #[tokio::test]
    async fn skipped_auto_reply_is_not_a_failure() {
        let svc = service(Arc::new(OkMailer));
        let mut lead = lead();
        lead.email = String::new();
        assert!(svc.notify(&lead).await.is_ok());
    }
}
