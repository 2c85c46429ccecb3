//! Notification dispatcher - fans an eligible, deduplicated lead out to
//! up to three independent channels.
//!
//! Channels: owner alert, lead auto-reply, and an optional external
//! audit sink. Failure of one never prevents attempting the others, and
//! no channel failure ever fails the caller's turn; background dispatch
//! runs as a supervised task whose outcome is logged.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::{LeadRecord, SCORE_SCALE_MAX};
use crate::ports::{AuditSink, EmailMessage, Mailer};

/// Dispatches lead notifications.
pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
    audit: Option<Arc<dyn AuditSink>>,
    /// Formatted From header for outbound mail.
    from_header: String,
    /// Operator address receiving owner alerts.
    owner_address: String,
}

/// Per-channel outcome of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOutcome {
    /// Channel accepted the notification.
    Delivered,
    /// Channel was attempted and failed; logged, never propagated.
    Failed,
    /// Channel was not applicable (no email, no sink configured).
    Skipped,
}

/// Outcomes across all three channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub owner_alert: ChannelOutcome,
    pub auto_reply: ChannelOutcome,
    pub audit: ChannelOutcome,
}

impl DispatchReport {
    /// Whether any attempted channel failed.
    pub fn any_failed(&self) -> bool {
        [self.owner_alert, self.auto_reply, self.audit]
            .iter()
            .any(|c| *c == ChannelOutcome::Failed)
    }
}

impl NotificationDispatcher {
    /// Creates a dispatcher. The audit sink is optional; when absent the
    /// audit channel reports [`ChannelOutcome::Skipped`].
    pub fn new(
        mailer: Arc<dyn Mailer>,
        audit: Option<Arc<dyn AuditSink>>,
        from_header: String,
        owner_address: String,
    ) -> Self {
        Self {
            mailer,
            audit,
            from_header,
            owner_address,
        }
    }

    /// Runs all applicable channels for one lead, awaiting each and
    /// swallowing per-channel failures.
    pub async fn dispatch(&self, lead: &LeadRecord) -> DispatchReport {
        let owner_alert = self.send_owner_alert(lead).await;
        let auto_reply = self.send_auto_reply(lead).await;
        let audit = self.record_audit(lead).await;

        DispatchReport {
            owner_alert,
            auto_reply,
            audit,
        }
    }

    /// Hands a dispatch to a supervised background task. The caller's
    /// turn does not wait for the outcome; failures surface in the log.
    pub fn dispatch_background(self: &Arc<Self>, lead: LeadRecord) {
        let dispatcher = Arc::clone(self);
        tokio::spawn(async move {
            let report = dispatcher.dispatch(&lead).await;
            if report.any_failed() {
                tracing::warn!(?report, "background lead dispatch had channel failures");
            } else {
                tracing::info!("background lead dispatch complete");
            }
        });
    }

    async fn send_owner_alert(&self, lead: &LeadRecord) -> ChannelOutcome {
        let message = EmailMessage {
            from: self.from_header.clone(),
            to: self.owner_address.clone(),
            subject: owner_subject(lead, Utc::now()),
            html: owner_alert_html(lead),
        };

        match self.mailer.send(message).await {
            Ok(()) => ChannelOutcome::Delivered,
            Err(e) => {
                tracing::error!(error = %e, "owner alert delivery failed");
                ChannelOutcome::Failed
            }
        }
    }

    async fn send_auto_reply(&self, lead: &LeadRecord) -> ChannelOutcome {
        if !lead.has_contact_email() {
            return ChannelOutcome::Skipped;
        }

        let message = EmailMessage {
            from: self.from_header.clone(),
            to: lead.email.clone(),
            subject: "Thanks for reaching out".to_string(),
            html: auto_reply_html(lead),
        };

        match self.mailer.send(message).await {
            Ok(()) => ChannelOutcome::Delivered,
            Err(e) => {
                tracing::warn!(error = %e, "lead auto-reply delivery failed");
                ChannelOutcome::Failed
            }
        }
    }

    async fn record_audit(&self, lead: &LeadRecord) -> ChannelOutcome {
        let Some(sink) = &self.audit else {
            return ChannelOutcome::Skipped;
        };

        match sink.record(lead).await {
            Ok(()) => ChannelOutcome::Delivered,
            Err(e) => {
                tracing::warn!(error = %e, "audit sink record failed");
                ChannelOutcome::Failed
            }
        }
    }
}

/// Owner-alert subject: numeric score, truncated project description,
/// human-readable timestamp.
fn owner_subject(lead: &LeadRecord, now: DateTime<Utc>) -> String {
    format!(
        "Lead [{}/{}]: {} - {}",
        lead.score,
        SCORE_SCALE_MAX,
        lead.project_snippet(),
        now.format("%b %e, %H:%M UTC")
    )
}

/// Minimal HTML escaping for model-generated field values.
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn field_or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        escape_html(value)
    }
}

fn owner_alert_html(lead: &LeadRecord) -> String {
    let row = |label: &str, value: &str| {
        format!(
            "<tr><td style=\"padding: 8px 0; color: #666; width: 100px;\">{}</td>\
             <td style=\"padding: 8px 0;\">{}</td></tr>",
            label,
            field_or_placeholder(value, "Not provided")
        )
    };

    format!(
        "<div style=\"font-family: -apple-system, sans-serif; max-width: 600px;\">\
         <h2 style=\"margin-bottom: 24px;\">New Lead - Score: {}/{}</h2>\
         <table style=\"width: 100%; border-collapse: collapse;\">{}{}{}{}{}</table>\
         <div style=\"margin-top: 24px; padding: 16px; background: #f5f5f5; border-radius: 8px;\">\
         <strong>Summary:</strong><br>{}</div></div>",
        lead.score,
        SCORE_SCALE_MAX,
        row("Email", &lead.email),
        row("Company", &lead.company),
        row("Project", &lead.project),
        row("Budget", &lead.budget),
        row("Timeline", &lead.timeline),
        field_or_placeholder(&lead.summary, "No summary"),
    )
}

fn auto_reply_html(lead: &LeadRecord) -> String {
    let greeting = if lead.name.is_empty() {
        "Hi,".to_string()
    } else {
        format!("Hi {},", escape_html(&lead.name))
    };

    format!(
        "<div style=\"font-family: -apple-system, sans-serif; max-width: 600px;\">\
         <p>{}</p>\
         <p>Thanks for your interest. We received your inquiry and will be in touch within 24 hours.</p>\
         <p><strong>What you shared:</strong></p>\
         <ul style=\"color: #666;\">\
         <li>Project: {}</li>\
         <li>Timeline: {}</li>\
         <li>Budget: {}</li>\
         </ul>\
         <p>If you have any additional details to share, feel free to reply to this email.</p>\
         </div>",
        greeting,
        field_or_placeholder(&lead.project, "To be discussed"),
        field_or_placeholder(&lead.timeline, "To be discussed"),
        field_or_placeholder(&lead.budget, "To be discussed"),
    )
}
