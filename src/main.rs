//! poppleberry CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use poppleberry::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    tokio::select! {
        result = cli.execute() => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n🛑 Process interrupted by user");
            std::process::exit(1);
        }
    }
}
