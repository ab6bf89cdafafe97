//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check candidates are absolute http URLs without duplicates
//! - Validate value ranges (attempts, timeouts, intervals > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SelectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::SelectorConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one candidate endpoint is required")]
    NoCandidates,

    #[error("candidate '{endpoint}' is invalid: {reason}")]
    InvalidCandidate { endpoint: String, reason: String },

    #[error("candidate '{0}' is listed more than once")]
    DuplicateCandidate(String),

    #[error("backoff.max_attempts_per_candidate must be at least 1")]
    ZeroAttempts,

    #[error("probe.timeout_secs must be at least 1")]
    ZeroProbeTimeout,

    #[error("monitor.interval_secs must be at least 1")]
    ZeroMonitorInterval,

    #[error("reselect_deadline_secs must be at least 1 when set")]
    ZeroDeadline,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &SelectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.candidates.is_empty() {
        errors.push(ValidationError::NoCandidates);
    }

    let mut seen = HashSet::new();
    for endpoint in &config.candidates {
        if let Err(reason) = check_candidate(endpoint) {
            errors.push(ValidationError::InvalidCandidate {
                endpoint: endpoint.clone(),
                reason,
            });
        }
        if !seen.insert(endpoint.trim_end_matches('/')) {
            errors.push(ValidationError::DuplicateCandidate(endpoint.clone()));
        }
    }

    if config.backoff.max_attempts_per_candidate == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }
    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }
    if config.monitor.enabled && config.monitor.interval_secs == 0 {
        errors.push(ValidationError::ZeroMonitorInterval);
    }
    if config.reselect_deadline_secs == Some(0) {
        errors.push(ValidationError::ZeroDeadline);
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_candidate(endpoint: &str) -> Result<(), String> {
    let url = Url::parse(endpoint).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" => {}
        "https" => return Err("https is not supported by the HTTP probe client".to_string()),
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}
