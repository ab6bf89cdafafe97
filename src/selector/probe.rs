//! Liveness probing.
//!
//! # Responsibilities
//! - Open a stream against a probe URL under a timeout
//! - Collapse every failure into `false`
//! - Release the opened stream before returning

use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use crate::fetch::{CompressionType, StreamFetcher};
use crate::observability::metrics;

/// A liveness check against a single URL.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Returns `true` if the URL answered. Never fails.
    async fn probe(&self, url: &str) -> bool;
}

/// Probe that considers an endpoint alive when a stream can be opened.
#[derive(Debug, Clone)]
pub struct StreamProbe<F> {
    fetcher: F,
    compression: CompressionType,
    timeout: Duration,
}

impl<F: StreamFetcher> StreamProbe<F> {
    pub fn new(fetcher: F, compression: CompressionType, timeout: Duration) -> Self {
        Self {
            fetcher,
            compression,
            timeout,
        }
    }
}

#[async_trait]
impl<F: StreamFetcher> HealthProbe for StreamProbe<F> {
    async fn probe(&self, url: &str) -> bool {
        tracing::info!(url = %url, "Checking endpoint liveness");

        let healthy = match time::timeout(self.timeout, self.fetcher.open(url, self.compression)).await {
            Ok(Ok(stream)) => {
                tracing::debug!(url = %url, bytes = stream.len(), "Probe succeeded");
                drop(stream);
                true
            }
            Ok(Err(e)) => {
                tracing::info!(url = %url, error = %e, "Probe failed");
                false
            }
            Err(_) => {
                tracing::warn!(url = %url, timeout_ms = self.timeout.as_millis() as u64, "Probe timed out");
                false
            }
        };

        metrics::record_probe(healthy);
        healthy
    }
}
