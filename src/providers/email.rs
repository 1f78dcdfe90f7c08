//! Resend email dispatch collaborator

use async_trait::async_trait;
use serde::Serialize;

use super::{EmailProvider, EmailReceipt};
use crate::{Error, Result};

const SEND_URL: &str = "https://api.resend.com/emails";

/// Transactional email via the Resend API
pub struct ResendEmail {
    client: reqwest::Client,
    api_key: String,
    sender: String,
}

impl ResendEmail {
    /// Create a new email provider
    ///
    /// `sender` is the from-address, e.g. `Voice Assistant <hello@example.com>`.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, sender: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "Resend API key required for email dispatch".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            sender,
        })
    }

    async fn dispatch(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        let request = SendRequest {
            from: &self.sender,
            to: vec![recipient],
            subject,
            text: body,
        };

        let response = self
            .client
            .post(SEND_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            return Err(Error::Email(format!(
                "email API error {status}: {err_body}"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl EmailProvider for ResendEmail {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> EmailReceipt {
        match self.dispatch(recipient, subject, body).await {
            Ok(()) => {
                tracing::info!(recipient, "email sent");
                EmailReceipt::Success {
                    receiver_email_account: recipient.to_string(),
                    message: body.to_string(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, recipient, "email dispatch failed");
                EmailReceipt::Failure {
                    receiver_email_account: recipient.to_string(),
                    message: body.to_string(),
                }
            }
        }
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
}
