//! Endpoint selection subsystem.
//!
//! # Data Flow
//! ```text
//! current_endpoint():
//!     atomic read (lazily initialised to candidate 0)
//!
//! verify():
//!     url.rs (build probe URL for current endpoint)
//!     → probe.rs (open stream, collapse to bool)
//!     → on failure: reselect()
//!
//! reselect():
//!     state.rs (Idle → Reselecting, or return AlreadyInProgress)
//!     → for each candidate from index 0:
//!         probe up to N times, backoff.rs pause between failures
//!     → install first alive candidate, or NoAliveEndpoint
//!     → guard drop: Reselecting → Idle
//! ```
//!
//! # Design Decisions
//! - Scans always restart at the first candidate (prefer primary)
//! - Concurrent callers never wait for a scan; they skip it
//! - Probe and URL builder are traits so failover runs without network I/O in tests

pub mod backoff;
pub mod endpoint;
pub mod probe;
pub mod state;
pub mod types;
pub mod url;

pub use backoff::BackoffPolicy;
pub use endpoint::EndpointSelector;
pub use probe::{HealthProbe, StreamProbe};
pub use types::{ReselectOutcome, SelectorError, SelectorResult, VerifyOutcome};
pub use url::{ClusterInfoUrlBuilder, ProbeUrlBuilder};
