//! Error types for the agent.
//!
//! A small closed set: callers can decide abort-vs-continue policy from the
//! variant alone. A missing Gemini key is fatal at startup; everything else
//! is caught at the per-idea boundary and counted as that idea's failure.

use thiserror::Error;

/// Errors that can occur while processing ideas
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{provider} request failed: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    #[error("filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("document rendering failed: {0}")]
    Render(String),
}

impl AgentError {
    /// Wrap a provider-side failure (transport, non-success status, or a
    /// response missing expected fields — all handled identically).
    pub fn provider(provider: &'static str, message: impl ToString) -> Self {
        Self::Provider {
            provider,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = AgentError::provider("gemini", "HTTP 429: quota exceeded");
        assert_eq!(
            err.to_string(),
            "gemini request failed: HTTP 429: quota exceeded"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AgentError = io.into();
        assert!(matches!(err, AgentError::Filesystem(_)));
    }
}
