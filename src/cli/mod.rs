//! Command-line interface.
//!
//! One flat command: process every pending idea. The only knobs are the
//! voice tone for the spoken feedback and an email kill switch.

use anyhow::Result;
use clap::Parser;

use crate::config::AgentConfig;
use crate::pipeline::{Agent, VoiceStyle};

/// poppleberry - business idea critique agent
#[derive(Parser, Debug)]
#[command(name = "poppleberry")]
#[command(author, version, long_about = None)]
#[command(about = "Auto-processes all pending business ideas")]
pub struct Cli {
    /// Voice style for the spoken feedback
    #[arg(long, value_enum, default_value_t = VoiceStyle::Upbeat)]
    pub voice_style: VoiceStyle,

    /// Skip sending email with results
    #[arg(long)]
    pub no_email: bool,
}

impl Cli {
    /// Execute the batch run
    pub async fn execute(self) -> Result<()> {
        let config = AgentConfig::from_env()?;
        let email_enabled = !self.no_email;

        let agent = Agent::from_config(config);
        let summary = agent.run_batch(self.voice_style, email_enabled).await?;

        if summary.found == 0 {
            eprintln!("📭 No pending business ideas found in agent/user-ideas/pending/");
            eprintln!("💡 Add .md files to agent/user-ideas/pending/ to process them");
            return Ok(());
        }

        eprintln!();
        eprintln!("{}", "=".repeat(60));
        eprintln!("🎉 BATCH PROCESSING COMPLETE");
        eprintln!("{}", "=".repeat(60));
        eprintln!("✅ Successfully processed: {}", summary.processed);
        eprintln!("❌ Failed: {}", summary.failed);
        if summary.skipped > 0 {
            eprintln!("⚠️  Skipped empty files: {}", summary.skipped);
        }
        eprintln!(
            "📧 Email notifications: {}",
            if email_enabled { "Enabled" } else { "Disabled" }
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let cli = Cli::parse_from(["poppleberry"]);
        assert_eq!(cli.voice_style, VoiceStyle::Upbeat);
        assert!(!cli.no_email);
    }

    #[test]
    fn test_voice_style_flag() {
        let cli = Cli::parse_from(["poppleberry", "--voice-style", "serious"]);
        assert_eq!(cli.voice_style, VoiceStyle::Serious);

        let cli = Cli::parse_from(["poppleberry", "--voice-style", "flippant", "--no-email"]);
        assert_eq!(cli.voice_style, VoiceStyle::Flippant);
        assert!(cli.no_email);
    }

    #[test]
    fn test_rejects_unknown_voice_style() {
        assert!(Cli::try_parse_from(["poppleberry", "--voice-style", "bored"]).is_err());
    }
}
