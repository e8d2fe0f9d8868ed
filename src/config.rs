//! Configuration for the agent.
//!
//! Configuration sources:
//! 1. Environment variables (GEMINI_API_KEY, RESEND_API_KEY, USER_EMAIL)
//! 2. Defaults (workspace-relative directory layout, built-in recipient)
//!
//! Everything is read once at startup into an explicit `AgentConfig` that is
//! passed into the pipeline entry point, so tests can construct one directly
//! without touching the environment.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::AgentError;

/// Default notification recipient (override with USER_EMAIL)
pub const DEFAULT_RECIPIENT: &str = "daniel@danielrosehill.com";

/// Sender identity used for outgoing mail
pub const SENDER: &str = "Herman Poppleberry <noreply@danielrosehill.co.il>";

/// Name the agent signs its analyses with
pub const ANALYST_NAME: &str = "Herman Poppleberry";

/// Fallback system prompt used when design/system-prompt.md is absent
const FALLBACK_SYSTEM_PROMPT: &str = "Your purpose is to act as a friendly and helpful business refinement agent. \
Your task is to assist the user by providing analysis, evaluation and feedback upon a business idea. \
Write in a conversational style as Herman Poppleberry, addressing Daniel directly.";

/// Resolved agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Gemini API key (required)
    pub gemini_api_key: String,

    /// Resend API key; absence downgrades email delivery to a no-op
    pub resend_api_key: Option<String>,

    /// Recipient address for result emails
    pub recipient: String,

    /// Filesystem layout
    pub paths: AgentPaths,
}

/// Workspace-relative directory layout
#[derive(Debug, Clone)]
pub struct AgentPaths {
    /// Input queue: idea files waiting to be processed
    pub pending_dir: PathBuf,

    /// Archive: idea files that have been processed
    pub evaluated_dir: PathBuf,

    /// Per-run output folders live under here
    pub feedback_dir: PathBuf,

    /// Optional system prompt override file
    pub system_prompt: PathBuf,
}

impl AgentPaths {
    /// Lay out the standard directories under a root
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            pending_dir: root.join("agent").join("user-ideas").join("pending"),
            evaluated_dir: root.join("agent").join("user-ideas").join("evaluated"),
            feedback_dir: root.join("agent").join("feedback"),
            system_prompt: root.join("design").join("system-prompt.md"),
        }
    }
}

impl Default for AgentPaths {
    fn default() -> Self {
        Self::new(".")
    }
}

impl AgentConfig {
    /// Build configuration from the environment.
    ///
    /// Missing GEMINI_API_KEY is fatal. A missing RESEND_API_KEY is not: the
    /// notify step becomes a no-op with a warning.
    pub fn from_env() -> Result<Self, AgentError> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AgentError::Configuration(
                    "GEMINI_API_KEY environment variable is required".to_string(),
                )
            })?;

        let resend_api_key = std::env::var("RESEND_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let recipient = std::env::var("USER_EMAIL")
            .ok()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_RECIPIENT.to_string());

        Ok(Self {
            gemini_api_key,
            resend_api_key,
            recipient,
            paths: AgentPaths::default(),
        })
    }

    /// Create the output and archive directories if they don't exist yet
    pub async fn ensure_directories(&self) -> Result<(), AgentError> {
        fs::create_dir_all(&self.paths.pending_dir).await?;
        fs::create_dir_all(&self.paths.evaluated_dir).await?;
        fs::create_dir_all(&self.paths.feedback_dir).await?;
        Ok(())
    }

    /// Load the system prompt, falling back to the built-in one
    pub async fn load_system_prompt(&self) -> String {
        match fs::read_to_string(&self.paths.system_prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => FALLBACK_SYSTEM_PROMPT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_layout() {
        let paths = AgentPaths::new("/work");
        assert_eq!(
            paths.pending_dir,
            PathBuf::from("/work/agent/user-ideas/pending")
        );
        assert_eq!(
            paths.evaluated_dir,
            PathBuf::from("/work/agent/user-ideas/evaluated")
        );
        assert_eq!(paths.feedback_dir, PathBuf::from("/work/agent/feedback"));
    }

    fn test_config(root: &Path) -> AgentConfig {
        AgentConfig {
            gemini_api_key: "test-key".to_string(),
            resend_api_key: None,
            recipient: DEFAULT_RECIPIENT.to_string(),
            paths: AgentPaths::new(root),
        }
    }

    #[tokio::test]
    async fn test_ensure_directories() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());

        config.ensure_directories().await.unwrap();

        assert!(config.paths.pending_dir.is_dir());
        assert!(config.paths.evaluated_dir.is_dir());
        assert!(config.paths.feedback_dir.is_dir());
    }

    #[tokio::test]
    async fn test_system_prompt_fallback() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());

        let prompt = config.load_system_prompt().await;
        assert!(prompt.contains("Herman Poppleberry"));
    }

    #[tokio::test]
    async fn test_system_prompt_from_file() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());

        let design_dir = temp.path().join("design");
        tokio::fs::create_dir_all(&design_dir).await.unwrap();
        tokio::fs::write(design_dir.join("system-prompt.md"), "Be terse.\n")
            .await
            .unwrap();

        let prompt = config.load_system_prompt().await;
        assert_eq!(prompt, "Be terse.");
    }
}
