//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! selector / probe / monitor produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout log lines
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields (endpoint, attempt, url) on every failover event
//! - Metrics are cheap and no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
