//! poppleberry - business idea critique agent
//!
//! A batch pipeline for one operator: pending idea documents are critiqued by
//! Gemini, the critique is read aloud by Gemini TTS, rendered as Markdown,
//! PDF and plain text, and the artifacts are emailed via Resend.
//!
//! # Architecture
//!
//! One idea fully traverses the pipeline before the next begins:
//! critique → filename suggestion → speech → documents → email → archive.
//! A failure aborts only that idea's pass; the batch continues.
//!
//! # Modules
//!
//! - `providers`: External service integrations (Gemini, Resend)
//! - `pipeline`: Per-idea orchestration and the batch loop
//! - `audio`: Raw-PCM-to-WAV container encoding
//! - `report`: Markdown and PDF document writers
//! - `queue`: Pending/evaluated idea lifecycle
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Process all pending ideas with the default upbeat voice
//! poppleberry
//!
//! # Stern feedback, no email
//! poppleberry --voice-style serious --no-email
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod providers;
pub mod queue;
pub mod report;

// Re-export main types at crate root for convenience
pub use config::{AgentConfig, AgentPaths};
pub use error::AgentError;
pub use pipeline::{Agent, BatchSummary, CritiqueRun, VoiceStyle};
pub use providers::{Attachment, ModelProvider, Notification, Notifier, SpeechAudio};
