//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SelectorConfig (validated, immutable)
//!     → EndpointSelector::from_config
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the candidate list never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BackoffConfig;
pub use schema::MonitorConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProbeConfig;
pub use schema::SelectorConfig;
