//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Active checks (active.rs):
//!     Periodic timer
//!     → EndpointSelector::verify
//!     → failover scan when the selected endpoint stops answering
//! ```
//!
//! Callers that see real work fail may call `verify()` themselves in addition.

pub mod active;

pub use active::SelectorMonitor;
