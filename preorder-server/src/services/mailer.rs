//! Follow-up email delivery via the Resend HTTP API
//!
//! The worker only needs "send one templated email to this address", so the
//! provider sits behind the [`Mailer`] trait and tests substitute a recorder.

use async_trait::async_trait;
use serde_json::json;

use crate::core::config::FollowupConfig;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

const FOLLOWUP_SUBJECT: &str = "Thank you for your preorder";

const FOLLOWUP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>Thank you for your preorder</title>
  </head>
  <body style="font-family: sans-serif; color: #1b2233; margin: 0; padding: 32px 16px;">
    <h1 style="font-size: 22px;">Thank you for your preorder</h1>
    <p>
      We have received your preorder and wanted to thank you for the early
      support. Your preorder secures your place in the first production run.
    </p>
    <p>
      We will follow up with updates once sourcing is completed and timelines
      are confirmed. No action is needed from you in the meantime.
    </p>
    <p style="font-size: 12px; color: #67709a;">
      If you have any questions, simply reply to this email.
    </p>
  </body>
</html>"#;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Email request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Email provider rejected send ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Outbound confirmation-email seam
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the preorder confirmation email to one recipient
    async fn send_followup(&self, to: &str) -> Result<(), MailerError>;
}

/// Resend-backed mailer
pub struct ResendMailer {
    client: reqwest::Client,
    config: FollowupConfig,
}

impl ResendMailer {
    pub fn new(config: FollowupConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_followup(&self, to: &str) -> Result<(), MailerError> {
        let mut payload = json!({
            "from": self.config.from_email,
            "to": to,
            "subject": FOLLOWUP_SUBJECT,
            "html": FOLLOWUP_HTML,
        });
        if let Some(reply_to) = &self.config.reply_to {
            payload["reply_to"] = json!(reply_to);
        }

        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
