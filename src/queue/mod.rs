//! Filesystem-backed idea queue.
//!
//! Lifecycle is directory membership: unprocessed ideas live in the pending
//! directory, processed ones are renamed into the evaluated directory. Files
//! are read once and never mutated in place.

use std::path::PathBuf;

use glob::glob;
use tokio::fs;

use crate::error::AgentError;

/// An idea file waiting in the pending directory
#[derive(Debug, Clone)]
pub struct PendingIdea {
    /// Full path to the pending file
    pub path: PathBuf,

    /// File name only
    pub name: String,
}

/// Pending/evaluated idea queue
pub struct IdeaQueue {
    pending_dir: PathBuf,
    evaluated_dir: PathBuf,
}

impl IdeaQueue {
    /// Create a queue over the given directories
    pub fn new(pending_dir: PathBuf, evaluated_dir: PathBuf) -> Self {
        Self {
            pending_dir,
            evaluated_dir,
        }
    }

    /// Enumerate pending idea files (`*.md`), sorted by file name
    pub fn pending(&self) -> Result<Vec<PendingIdea>, AgentError> {
        let pattern = self.pending_dir.join("*.md");
        let pattern = pattern.to_string_lossy();

        let paths = glob(&pattern)
            .map_err(|e| AgentError::Configuration(format!("invalid queue pattern: {}", e)))?;

        let mut ideas = Vec::new();
        for entry in paths {
            let path = entry
                .map_err(|e| AgentError::Filesystem(e.into_error()))?;
            let name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            ideas.push(PendingIdea { path, name });
        }

        ideas.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ideas)
    }

    /// Read an idea's text, trimmed. Empty means the file should be skipped.
    pub async fn read(&self, idea: &PendingIdea) -> Result<String, AgentError> {
        let text = fs::read_to_string(&idea.path).await?;
        Ok(text.trim().to_string())
    }

    /// Rename a processed idea file from pending to evaluated
    pub async fn archive(&self, idea: &PendingIdea) -> Result<PathBuf, AgentError> {
        let target = self.evaluated_dir.join(&idea.name);
        fs::rename(&idea.path, &target).await?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_queue() -> (IdeaQueue, TempDir) {
        let temp = TempDir::new().unwrap();
        let pending = temp.path().join("pending");
        let evaluated = temp.path().join("evaluated");
        fs::create_dir_all(&pending).await.unwrap();
        fs::create_dir_all(&evaluated).await.unwrap();
        (IdeaQueue::new(pending, evaluated), temp)
    }

    #[tokio::test]
    async fn test_pending_lists_only_markdown() {
        let (queue, temp) = create_test_queue().await;
        let pending = temp.path().join("pending");

        fs::write(pending.join("b-idea.md"), "second").await.unwrap();
        fs::write(pending.join("a-idea.md"), "first").await.unwrap();
        fs::write(pending.join("notes.txt"), "ignored").await.unwrap();

        let ideas = queue.pending().unwrap();
        let names: Vec<&str> = ideas.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a-idea.md", "b-idea.md"]);
    }

    #[tokio::test]
    async fn test_pending_empty_directory() {
        let (queue, _temp) = create_test_queue().await;
        assert!(queue.pending().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_trims_whitespace() {
        let (queue, temp) = create_test_queue().await;
        let pending = temp.path().join("pending");
        fs::write(pending.join("idea.md"), "  an idea \n\n").await.unwrap();

        let ideas = queue.pending().unwrap();
        let text = queue.read(&ideas[0]).await.unwrap();
        assert_eq!(text, "an idea");
    }

    #[tokio::test]
    async fn test_archive_moves_file() {
        let (queue, temp) = create_test_queue().await;
        let pending = temp.path().join("pending");
        fs::write(pending.join("idea.md"), "content").await.unwrap();

        let ideas = queue.pending().unwrap();
        let target = queue.archive(&ideas[0]).await.unwrap();

        assert!(!ideas[0].path.exists());
        assert!(target.exists());
        assert_eq!(target, temp.path().join("evaluated").join("idea.md"));
        assert!(queue.pending().unwrap().is_empty());
    }
}
