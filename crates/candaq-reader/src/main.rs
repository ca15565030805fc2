//! candaq-reader - CAN bus data acquisition
//!
//! Receives frames from the configured CAN interface and prints one line per
//! frame on stdout, decoded or as raw hex depending on `human_readable`.
//!
//! # Usage
//!
//! ```bash
//! ./candaq-reader                      # reads ./config.json
//! ./candaq-reader --config bench.toml  # alternate config
//! RUST_LOG=candaq_transport=trace ./candaq-reader
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use candaq_core::OutputMode;
use candaq_reader::Reader;
use candaq_transport::{create_transport, SystemConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "candaq-reader")]
#[command(about = "Receive CAN frames and print them")]
struct Args {
    /// Configuration file path (JSON, or TOML with a .toml extension)
    #[arg(short, long, env = "CANDAQ_CONFIG", default_value = "config.json")]
    config: String,

    /// Stop after printing this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "candaq_reader=debug,candaq_transport=debug"
    } else {
        "candaq_reader=info,candaq_transport=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SystemConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    let transport = create_transport(&config).context("Failed to create transport")?;
    let mut reader = Reader::new(
        transport,
        OutputMode::from_human_readable(config.human_readable),
    );

    reader
        .open()
        .await
        .with_context(|| format!("Failed to open {} transport", reader.transport_name()))?;

    info!(
        interface = %config.interface,
        transport = reader.transport_name(),
        human_readable = reader.mode().is_human_readable(),
        "Reader started"
    );

    let running = Arc::new(AtomicBool::new(true));
    let running_for_signal = running.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down...");
            running_for_signal.store(false, Ordering::SeqCst);
        }
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let printed = reader.run(&running, args.max_frames, &mut out).await?;

    reader.close();
    info!(frames = printed, "Reader stopped");
    Ok(())
}
