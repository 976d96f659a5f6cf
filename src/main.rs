//! Yui Bootstrap — self-updating launcher for the Yui bot.
//!
//! Usage:
//!   yui-bootstrap                 Run the launch loop in the current directory
//!   yui-bootstrap --dir ~/yui     Run it in another directory

use anyhow::Result;
use clap::Parser;
use tracing::info;

use yui_bootstrap::config;
use yui_bootstrap::fetch::HttpDownloader;
use yui_bootstrap::supervisor::{ProcessLauncher, Supervisor};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "yui-bootstrap")]
#[command(version)]
#[command(about = "Launches the Yui bot and keeps it running and up to date")]
struct Cli {
    /// Directory holding the bot jar; the bot runs from here.
    #[arg(long, default_value = ".")]
    dir: String,

    /// Log level (debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cfg = config::load_config(&cli.dir)?;
    let downloader = HttpDownloader::new(&cfg.version, cfg.download_timeout)?;

    let status = Supervisor::new(&cfg, downloader, ProcessLauncher).run().await;

    info!("Bootstrap exiting with status {}", status);
    std::process::exit(status);
}
