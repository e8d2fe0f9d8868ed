//! Provider interfaces for external services.
//!
//! Two seams: the generative-language/speech provider (Gemini) and the email
//! notifier (Resend). The pipeline depends on the traits so tests can run the
//! whole loop with stub providers and no network.

pub mod gemini;
pub mod resend;

use async_trait::async_trait;

use crate::error::AgentError;

pub use gemini::GeminiClient;
pub use resend::ResendClient;

/// Audio returned by the speech provider
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    /// Decoded audio bytes (raw PCM or a complete container, per mime_type)
    pub data: Vec<u8>,

    /// Content type the provider declared for the bytes
    pub mime_type: String,
}

/// An attachment for the results email
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

/// Outbound notification carrying the rendered artifacts
#[derive(Debug, Clone)]
pub struct Notification {
    /// Short plain-text summary of the critique for the email body
    pub summary: String,

    /// Audio, markdown and PDF artifacts
    pub attachments: Vec<Attachment>,
}

/// Generative-language and speech provider
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Generate a prose critique of a business idea
    async fn critique(&self, system_prompt: &str, idea: &str) -> Result<String, AgentError>;

    /// Suggest a short kebab-case filename slug for an idea
    async fn suggest_slug(&self, idea: &str) -> Result<String, AgentError>;

    /// Synthesize speech for the critique, read with the given tone
    /// instruction
    async fn synthesize(&self, instruction: &str, text: &str)
        -> Result<SpeechAudio, AgentError>;
}

/// Email delivery provider
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one results email with attachments
    async fn send(&self, notification: &Notification) -> Result<(), AgentError>;
}
