//! Resend mailer - implementation of `Mailer` over the Resend REST API.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::ports::{EmailMessage, MailError, Mailer};

/// Mailer backed by the Resend API.
pub struct ResendMailer {
    api_key: Secret<String>,
    base_url: String,
    client: Client,
}

impl ResendMailer {
    /// Creates a mailer with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.resend.com".to_string(),
            client,
        }
    }

    /// Overrides the API base URL (for tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.base_url)
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        let body = ResendRequest {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
        };

        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MailError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_url_appends_path() {
        let mailer = ResendMailer::new("re_test").with_base_url("https://mail.test");
        assert_eq!(mailer.emails_url(), "https://mail.test/emails");
    }

    #[test]
    fn request_serializes_expected_shape() {
        let request = ResendRequest {
            from: "Studio <n@s.com>",
            to: "a@b.com",
            subject: "Hello",
            html: "<p>Hi</p>",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["from"], "Studio <n@s.com>");
        assert_eq!(json["to"], "a@b.com");
        assert_eq!(json["subject"], "Hello");
        assert_eq!(json["html"], "<p>Hi</p>");
    }
}
