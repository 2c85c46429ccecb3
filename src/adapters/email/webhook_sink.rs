//! Webhook audit sink - posts captured leads to an external log endpoint.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::domain::LeadRecord;
use crate::ports::{AuditError, AuditSink};

/// Audit sink that POSTs one JSON record per lead to a configured webhook.
pub struct WebhookAuditSink {
    endpoint: String,
    client: Client,
}

impl WebhookAuditSink {
    /// Creates a sink for the given webhook URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

#[async_trait]
impl AuditSink for WebhookAuditSink {
    async fn record(&self, lead: &LeadRecord) -> Result<(), AuditError> {
        let record = AuditRecord {
            timestamp: Utc::now().to_rfc3339(),
            email: &lead.email,
            company: &lead.company,
            project: &lead.project,
            budget: &lead.budget,
            timeline: &lead.timeline,
            score: lead.score,
            summary: &lead.summary,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&record)
            .send()
            .await
            .map_err(|e| AuditError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AuditError::Rejected(status.as_u16()))
        }
    }
}

#[derive(Debug, Serialize)]
struct AuditRecord<'a> {
    timestamp: String,
    email: &'a str,
    company: &'a str,
    project: &'a str,
    budget: &'a str,
    timeline: &'a str,
    score: i32,
    summary: &'a str,
}
