//! Periodic verification of the selected endpoint.
//!
//! # Responsibilities
//! - Call `verify()` on a fixed interval
//! - Log switches and total failures without stopping the loop
//! - Stop on shutdown, even while a failover scan is running

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::config::MonitorConfig;
use crate::selector::{EndpointSelector, SelectorResult, VerifyOutcome};

pub struct SelectorMonitor {
    selector: Arc<EndpointSelector>,
    config: MonitorConfig,
}

impl SelectorMonitor {
    pub fn new(selector: Arc<EndpointSelector>, config: MonitorConfig) -> Self {
        Self { selector, config }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if !self.config.enabled {
            tracing::info!("Periodic verification disabled");
            return;
        }

        tracing::info!(
            interval = self.config.interval_secs,
            endpoint = %self.selector.current_endpoint(),
            "Selector monitor starting"
        );

        let mut ticker = time::interval(Duration::from_secs(self.config.interval_secs));
        // A long failover scan should not cause a burst of catch-up ticks.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.recv() => {
                    tracing::info!("Selector monitor received shutdown signal, exiting loop");
                    break;
                }
            }

            // Dropping a verification mid-scan releases the reselection flag.
            tokio::select! {
                _ = self.check() => {}
                _ = shutdown.recv() => {
                    tracing::info!("Selector monitor received shutdown signal, abandoning verification");
                    break;
                }
            }
        }
    }

    /// Run one verification and log its outcome.
    pub async fn check(&self) -> SelectorResult<VerifyOutcome> {
        let result = self.selector.verify().await;
        match &result {
            Ok(VerifyOutcome::Healthy) => {
                tracing::debug!(endpoint = %self.selector.current_endpoint(), "Endpoint healthy");
            }
            Ok(VerifyOutcome::Switched { from, to }) => {
                tracing::info!(from = %from, to = %to, "Endpoint switched");
            }
            Ok(VerifyOutcome::ReselectInProgress) => {
                tracing::debug!("Reselection running elsewhere, keeping current endpoint");
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    endpoint = %self.selector.current_endpoint(),
                    "Service currently unreachable, will retry on next tick"
                );
            }
        }
        result
    }
}
