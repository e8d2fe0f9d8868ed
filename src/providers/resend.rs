//! Resend email client.
//!
//! One JSON POST per results email, with the audio, markdown and PDF
//! artifacts base64-encoded as attachments and a short HTML body.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Serialize;

use super::{Notification, Notifier};
use crate::config::{ANALYST_NAME, SENDER};
use crate::error::AgentError;

const API_URL: &str = "https://api.resend.com/emails";

const SUBJECT: &str = "Your Business Idea Analysis from Herman Poppleberry";

/// Resend API client
pub struct ResendClient {
    api_key: String,
    recipient: String,
    client: reqwest::Client,
}

impl ResendClient {
    /// Create a new client for one fixed recipient
    pub fn new(api_key: String, recipient: String) -> Self {
        Self {
            api_key,
            recipient,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for ResendClient {
    async fn send(&self, notification: &Notification) -> Result<(), AgentError> {
        let attachments: Vec<EmailAttachment> = notification
            .attachments
            .iter()
            .map(|a| EmailAttachment {
                filename: a.filename.clone(),
                content: BASE64.encode(&a.data),
                content_type: a.content_type,
            })
            .collect();

        let request = EmailRequest {
            from: SENDER,
            to: vec![self.recipient.as_str()],
            subject: SUBJECT,
            html: render_body(&notification.summary),
            attachments,
        };

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::provider("resend", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::provider(
                "resend",
                format!("HTTP {}: {}", status, body.trim()),
            ));
        }

        Ok(())
    }
}

/// HTML body for the results email
fn render_body(summary: &str) -> String {
    format!(
        "<h2>Business Idea Analysis Complete!</h2>\n\
         <p>Hi Daniel!</p>\n\
         <p>{analyst} here with your latest business idea analysis. \
         I've prepared three formats for your convenience:</p>\n\
         <ul>\n\
         <li><strong>&#127925; Audio Feedback</strong> - Listen to my complete analysis</li>\n\
         <li><strong>&#128196; Markdown File</strong> - Easy to read and edit digitally</li>\n\
         <li><strong>&#128196; PDF Report</strong> - Professional printable format</li>\n\
         </ul>\n\
         <h3>Quick Summary:</h3>\n\
         <p>{summary}</p>\n\
         <p>All three formats contain the same comprehensive analysis and recommendations.</p>\n\
         <p>Best regards,<br>\n\
         {analyst}<br>\n\
         Your AI Business Plan Review Assistant</p>",
        analyst = ANALYST_NAME,
        summary = summary,
    )
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: String,
    attachments: Vec<EmailAttachment>,
}

#[derive(Debug, Serialize)]
struct EmailAttachment {
    filename: String,
    content: String,
    content_type: &'static str,
}
