//! Per-idea orchestration.
//!
//! Drives the full sequence for each pending idea: critique, filename
//! suggestion, speech synthesis, document writing, email delivery, archive.
//! One idea traverses the whole pipeline before the next begins. A failure is
//! caught at the per-idea boundary, logged and counted; the batch continues
//! with the next idea. There is no retry and no rollback of partially
//! written files.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use tokio::fs;
use tracing::{error, info, instrument, warn};

use crate::audio::wav::{encode_wav, extension_for_mime, PcmFormat};
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::providers::{
    Attachment, GeminiClient, ModelProvider, Notification, Notifier, ResendClient,
};
use crate::queue::IdeaQueue;
use crate::report::{render_markdown, render_pdf};

/// Slug used when the model can't produce a usable filename suggestion
const FALLBACK_SLUG: &str = "business-idea";

/// Email body summary length, in characters
const SUMMARY_CHARS: usize = 200;

/// Voice tone for the spoken feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VoiceStyle {
    /// Stern and authoritative
    Serious,

    /// Sad and defeatist
    Flippant,

    /// Encouraging radio-infomercial energy
    Upbeat,
}

impl VoiceStyle {
    /// Tone instruction prepended to the text sent to the speech provider
    pub fn instruction(&self) -> &'static str {
        match self {
            VoiceStyle::Serious => {
                "Read this text in a stern and authoritative voice. Emulate the cadence \
                 and tone of voice of a judge delivering a verdict."
            }
            VoiceStyle::Flippant => {
                "Read this text with a sense of sadness and defeatism as if you are \
                 delivering hopeless news to somebody."
            }
            VoiceStyle::Upbeat => {
                "Read this text in a highly encouraging and upbeat tone of voice - the \
                 kind that you might hear in a cheesy radio informercial"
            }
        }
    }
}

impl Default for VoiceStyle {
    fn default() -> Self {
        Self::Upbeat
    }
}

impl std::fmt::Display for VoiceStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoiceStyle::Serious => write!(f, "serious"),
            VoiceStyle::Flippant => write!(f, "flippant"),
            VoiceStyle::Upbeat => write!(f, "upbeat"),
        }
    }
}

/// Everything one processing pass produced for one idea.
///
/// Built incrementally during the pass; only the derived files persist.
#[derive(Debug, Clone)]
pub struct CritiqueRun {
    pub timestamp: DateTime<Local>,
    pub idea: String,
    pub voice_style: VoiceStyle,
    pub critique: String,
    pub audio_path: PathBuf,
    pub markdown_path: PathBuf,
    pub pdf_path: PathBuf,
    pub text_path: PathBuf,
    pub email_sent: bool,
}

/// Outcome of one batch invocation
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Pending files found at startup
    pub found: usize,

    /// Ideas fully processed and archived
    pub processed: usize,

    /// Ideas that failed at any step
    pub failed: usize,

    /// Empty files skipped (counted neither processed nor failed)
    pub skipped: usize,

    /// Per-idea results, in processing order
    pub runs: Vec<CritiqueRun>,
}

/// The business idea critique agent
pub struct Agent {
    config: AgentConfig,
    queue: IdeaQueue,
    model: Box<dyn ModelProvider>,
    notifier: Option<Box<dyn Notifier>>,
}

impl Agent {
    /// Create an agent with explicit providers (tests use stubs here)
    pub fn new(
        config: AgentConfig,
        model: Box<dyn ModelProvider>,
        notifier: Option<Box<dyn Notifier>>,
    ) -> Self {
        let queue = IdeaQueue::new(
            config.paths.pending_dir.clone(),
            config.paths.evaluated_dir.clone(),
        );
        Self {
            config,
            queue,
            model,
            notifier,
        }
    }

    /// Create an agent wired to the real providers.
    ///
    /// The notifier is absent when no Resend key is configured; delivery then
    /// downgrades to a warning no-op.
    pub fn from_config(config: AgentConfig) -> Self {
        let model = Box::new(GeminiClient::new(config.gemini_api_key.clone()));
        let notifier: Option<Box<dyn Notifier>> = config
            .resend_api_key
            .clone()
            .map(|key| Box::new(ResendClient::new(key, config.recipient.clone())) as Box<dyn Notifier>);
        Self::new(config, model, notifier)
    }

    /// Process every pending idea, one at a time
    pub async fn run_batch(
        &self,
        voice_style: VoiceStyle,
        send_email: bool,
    ) -> Result<BatchSummary, AgentError> {
        self.config.ensure_directories().await?;

        let pending = self.queue.pending()?;
        let mut summary = BatchSummary {
            found: pending.len(),
            ..Default::default()
        };

        if pending.is_empty() {
            info!("No pending ideas found");
            return Ok(summary);
        }

        info!(count = pending.len(), "Found pending idea(s)");

        for idea_file in &pending {
            info!(file = %idea_file.name, "Processing idea");

            let idea = match self.queue.read(idea_file).await {
                Ok(text) => text,
                Err(e) => {
                    error!(file = %idea_file.name, error = %e, "Failed to read idea");
                    summary.failed += 1;
                    continue;
                }
            };

            if idea.is_empty() {
                warn!(file = %idea_file.name, "Skipping empty idea file");
                summary.skipped += 1;
                continue;
            }

            match self.process_idea(&idea, voice_style, send_email).await {
                Ok(run) => match self.queue.archive(idea_file).await {
                    Ok(archived) => {
                        info!(file = %idea_file.name, archived = %archived.display(), "Idea completed");
                        summary.processed += 1;
                        summary.runs.push(run);
                    }
                    Err(e) => {
                        error!(file = %idea_file.name, error = %e, "Failed to archive idea");
                        summary.failed += 1;
                    }
                },
                Err(e) => {
                    error!(file = %idea_file.name, error = %e, "Failed to process idea");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Run the full pipeline for one idea
    #[instrument(skip_all, fields(voice_style = %voice_style))]
    async fn process_idea(
        &self,
        idea: &str,
        voice_style: VoiceStyle,
        send_email: bool,
    ) -> Result<CritiqueRun, AgentError> {
        let system_prompt = self.config.load_system_prompt().await;

        info!("Generating critique");
        let critique = self.model.critique(&system_prompt, idea).await?;

        let slug = match self.model.suggest_slug(idea).await {
            Ok(raw) => sanitize_slug(&raw),
            Err(e) => {
                warn!(error = %e, "Filename suggestion failed, using fallback");
                FALLBACK_SLUG.to_string()
            }
        };

        let timestamp = Local::now();
        let folder = self.config.paths.feedback_dir.join(format!(
            "{}_{}",
            timestamp.format("%Y%m%d_%H%M%S"),
            slug
        ));
        fs::create_dir_all(&folder).await?;

        info!(folder = %folder.display(), "Synthesizing spoken feedback");
        let audio = self
            .model
            .synthesize(voice_style.instruction(), &critique)
            .await?;

        // A type with a known extension is assumed to be a complete
        // container and passes through untouched; anything else is raw PCM
        // that needs a WAV header.
        let (audio_bytes, extension) = match extension_for_mime(&audio.mime_type) {
            Some(ext) => (audio.data, ext),
            None => (
                encode_wav(&audio.data, PcmFormat::parse(&audio.mime_type)),
                "wav",
            ),
        };

        let audio_path = folder.join(format!("{}_audio.{}", slug, extension));
        fs::write(&audio_path, &audio_bytes).await?;

        let markdown = render_markdown(idea, &critique, &timestamp);
        let markdown_path = folder.join(format!("{}_analysis.md", slug));
        fs::write(&markdown_path, &markdown).await?;

        let pdf = render_pdf(idea, &critique, &timestamp)?;
        let pdf_path = folder.join(format!("{}_analysis.pdf", slug));
        fs::write(&pdf_path, &pdf).await?;

        let text_path = folder.join(format!("{}_analysis.txt", slug));
        fs::write(&text_path, &critique).await?;

        let email_sent = if send_email {
            self.notify(&slug, &critique, &audio_path, audio_bytes, markdown, pdf)
                .await
        } else {
            false
        };

        Ok(CritiqueRun {
            timestamp,
            idea: idea.to_string(),
            voice_style,
            critique,
            audio_path,
            markdown_path,
            pdf_path,
            text_path,
            email_sent,
        })
    }

    /// Send the results email; a delivery failure is a warning, not the
    /// idea's failure.
    async fn notify(
        &self,
        slug: &str,
        critique: &str,
        audio_path: &std::path::Path,
        audio_bytes: Vec<u8>,
        markdown: String,
        pdf: Vec<u8>,
    ) -> bool {
        let Some(notifier) = &self.notifier else {
            warn!("RESEND_API_KEY not set, skipping email delivery");
            return false;
        };

        let audio_filename = audio_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let notification = Notification {
            summary: summarize(critique),
            attachments: vec![
                Attachment {
                    filename: audio_filename,
                    content_type: "audio/wav",
                    data: audio_bytes,
                },
                Attachment {
                    filename: format!("{}_analysis.md", slug),
                    content_type: "text/markdown",
                    data: markdown.into_bytes(),
                },
                Attachment {
                    filename: format!("{}_analysis.pdf", slug),
                    content_type: "application/pdf",
                    data: pdf,
                },
            ],
        };

        match notifier.send(&notification).await {
            Ok(()) => {
                info!("Results email sent");
                true
            }
            Err(e) => {
                warn!(error = %e, "Email delivery failed");
                false
            }
        }
    }
}

/// Clean a model-suggested filename into a kebab-case slug
pub fn sanitize_slug(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .to_lowercase()
        .replace([' ', '_'], "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();

    if cleaned.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        cleaned
    }
}

/// First 200 characters of the critique for the email body
fn summarize(critique: &str) -> String {
    let mut summary: String = critique.chars().take(SUMMARY_CHARS).collect();
    if critique.chars().count() > SUMMARY_CHARS {
        summary.push_str("...");
    }
    summary
}
