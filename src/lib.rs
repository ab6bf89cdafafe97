//! HA-aware endpoint selection library.
//!
//! Tracks which of an ordered list of redundant service endpoints (for example
//! the resource managers of an active/standby cluster) is currently reachable,
//! and fails over to the first answering candidate when it stops responding.

pub mod config;
pub mod event;
pub mod fetch;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod selector;

pub use config::schema::SelectorConfig;
pub use health::SelectorMonitor;
pub use lifecycle::Shutdown;
pub use selector::{EndpointSelector, SelectorError, VerifyOutcome};
