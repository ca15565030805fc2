//! candaq-generator - CAN traffic generator
//!
//! Fabricates engine status, identification and electrical info frames at
//! independent rates and transmits them on the configured interface. Every
//! transmitted frame is echoed on stdout as a `[TX]` line.
//!
//! # Usage
//!
//! ```bash
//! ./candaq-generator                     # reads ./config.json
//! ./candaq-generator --max-cycles 30     # one full rate period, then exit
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use candaq_core::OutputMode;
use candaq_generator::Scheduler;
use candaq_transport::{create_transport, SystemConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "candaq-generator")]
#[command(about = "Generate multi-rate CAN traffic")]
struct Args {
    /// Configuration file path (JSON, or TOML with a .toml extension)
    #[arg(short, long, env = "CANDAQ_CONFIG", default_value = "config.json")]
    config: String,

    /// Stop after this many cycles
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "candaq_generator=debug,candaq_transport=debug"
    } else {
        "candaq_generator=info,candaq_transport=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SystemConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    let mut transport = create_transport(&config).context("Failed to create transport")?;
    transport
        .open()
        .await
        .with_context(|| format!("Failed to open {} transport", transport.name()))?;

    info!(
        interface = %config.interface,
        transport = transport.name(),
        "Generator started"
    );

    let running = Arc::new(AtomicBool::new(true));
    let running_for_signal = running.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down...");
            running_for_signal.store(false, Ordering::SeqCst);
        }
    });

    let mut scheduler = Scheduler::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let cycles = scheduler
        .run(
            transport.as_mut(),
            OutputMode::from_human_readable(config.human_readable),
            &running,
            args.max_cycles,
            &mut out,
        )
        .await?;

    transport.close();
    info!(cycles, "Generator stopped");
    Ok(())
}
