//! Telemetry node — host simulator entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  StdinSource ─▶ SerialLineTransport   WriterSink(stdout) │
//! │  SystemClock                          SimIndicator       │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          AppService (pure logic)               │      │
//! │  │  state · heartbeat · telemetry · commands      │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are read from stdin, responses and telemetry go to stdout and
//! logs go to stderr (`RUST_LOG` selects the level).
#![deny(unused_must_use)]

use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use telenode::adapters::clock::SystemClock;
use telenode::adapters::log_sink::WriterSink;
use telenode::adapters::serial::{SerialLineTransport, StdinSource};
use telenode::app::service::AppService;
use telenode::config::{NodeConfig, TelemetryPeriod};
use telenode::drivers::status_led::SimIndicator;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "telenode")]
#[command(about = "Telemetry node simulator: commands on stdin, responses on stdout")]
struct Cli {
    /// JSON config file (e.g. {"telemetry_period_ms": 500})
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Telemetry period in ms (10..60000); overrides the config file
    #[arg(short, long, value_name = "MS")]
    telemetry_ms: Option<u32>,

    /// Start the millisecond clock at this value (exercise counter wraparound)
    #[arg(long, default_value = "0", value_name = "MS")]
    clock_offset_ms: u32,

    /// Host sleep between polls
    #[arg(long, default_value = "1", value_name = "MS")]
    poll_interval_ms: u64,
}

fn load_config(cli: &Cli) -> Result<NodeConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            NodeConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => NodeConfig::build_default(),
    };
    if let Some(ms) = cli.telemetry_ms {
        config.telemetry_period_ms = TelemetryPeriod::new(ms).context("--telemetry-ms")?;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!("telenode v{}", env!("CARGO_PKG_VERSION"));

    let transport = SerialLineTransport::new(StdinSource::spawn().context("spawning stdin reader")?);
    let mut app = AppService::new(
        config,
        SimIndicator::new(),
        SystemClock::with_offset(cli.clock_offset_ms),
        transport,
        WriterSink::new(io::stdout()),
    );

    app.start();

    let poll_interval = Duration::from_millis(cli.poll_interval_ms);
    while !app.transport().source().is_closed() {
        app.poll();
        thread::sleep(poll_interval);
    }

    info!(
        "stdin closed; {} heartbeat toggles, {} faults",
        app.indicator().toggles(),
        app.context().fault_count
    );
    Ok(())
}
