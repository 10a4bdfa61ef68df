//! Homework Status Bot - Main Entry Point
//!
//! Polls the homework review API and sends a Telegram message
//! whenever a submission's review status changes.

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use homework_status_bot::relay::RelayMessage;
use homework_status_bot::startup::build_relay_from_env;

/// Telegram bot relaying homework review status changes.
#[derive(Parser, Debug)]
#[command(name = "homework_bot")]
#[command(about = "Relay homework review status changes to a Telegram chat")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Run a single polling cycle and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    info!("Homework status bot starting");

    // Nothing touches the network until every credential is present.
    let mut relay = match build_relay_from_env() {
        Ok(relay) => relay,
        Err(e) => {
            error!("{}. The bot is stopped.", e);
            return Err(e).context("Failed to start the bot");
        }
    };

    if args.once {
        if let Some(kind) = relay.tick().await {
            bail!("Polling cycle failed ({kind})");
        }
        return Ok(());
    }

    let (relay_tx, relay_rx) = mpsc::channel::<RelayMessage>(8);

    // Spawn relay task
    let relay_handle = tokio::spawn(async move {
        relay.run(relay_rx).await;
    });

    info!("Bot is running. Use Ctrl+C to stop.");

    // Wait for Ctrl+C
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down..."),
        Err(e) => {
            // Without a signal handler the relay runs until the process is killed.
            error!("Failed to listen for Ctrl+C: {}", e);
            let _ = relay_handle.await;
            return Ok(());
        }
    }

    let _ = relay_tx.send(RelayMessage::Shutdown).await;
    let _ = relay_handle.await;

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();
}
