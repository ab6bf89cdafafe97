//! Selector outcome types and error definitions.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the endpoint selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector was constructed without candidates.
    #[error("no candidate endpoints configured")]
    NoCandidates,

    /// Every candidate exhausted its probe attempts.
    #[error("No alive endpoint found: {}", .candidates.join(";"))]
    NoAliveEndpoint { candidates: Vec<String> },

    /// The failover scan did not finish within the configured deadline.
    #[error("reselection did not finish within {0:?}")]
    DeadlineExceeded(Duration),
}

/// Result type for selector operations.
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Result of a call to `reselect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReselectOutcome {
    /// This call ran the scan and installed the given endpoint.
    Selected(String),
    /// Another caller owns the scan; nothing was probed.
    AlreadyInProgress,
}

/// Result of a call to `verify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The current endpoint answered its probe.
    Healthy,
    /// The current endpoint failed and the scan installed `to`.
    /// `from` and `to` are equal when the scan re-selected the same endpoint.
    Switched { from: String, to: String },
    /// The current endpoint failed while another caller was already scanning.
    ReselectInProgress,
}
