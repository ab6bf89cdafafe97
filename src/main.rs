//! HA endpoint selector daemon.
//!
//! Loads a TOML configuration, then keeps verifying the selected endpoint
//! until SIGINT/SIGTERM, failing over between candidates as needed.
//!
//! ```text
//! ha-selector --config selector.toml          # run the periodic verifier
//! ha-selector --config selector.toml --once   # verify once and exit
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use ha_selector::config::load_config;
use ha_selector::lifecycle::{signals, Shutdown};
use ha_selector::observability::{logging, metrics};
use ha_selector::{EndpointSelector, SelectorMonitor};

#[derive(Parser)]
#[command(name = "ha-selector")]
#[command(about = "Keeps track of the reachable endpoint among redundant service instances", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "ha-selector.toml")]
    config: PathBuf,

    /// Verify once, print the selected endpoint and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        candidates = %config.candidates.join(","),
        compression = ?config.compression,
        max_attempts = config.backoff.max_attempts_per_candidate,
        delay_ms = config.backoff.delay_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let selector = Arc::new(EndpointSelector::from_config(&config)?);

    if cli.once {
        let outcome = selector.verify().await?;
        tracing::info!(outcome = ?outcome, "Verification finished");
        println!("{}", selector.current_endpoint());
        return Ok(());
    }

    let shutdown = Shutdown::new();
    let monitor = SelectorMonitor::new(selector.clone(), config.monitor.clone());
    let monitor_task = tokio::spawn(monitor.run(shutdown.subscribe()));

    signals::shutdown_on_signal(shutdown).await;
    monitor_task.await?;

    tracing::info!(endpoint = %selector.current_endpoint(), "Shutdown complete");
    Ok(())
}
