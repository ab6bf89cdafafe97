//! HA-aware endpoint selector.
//!
//! # Responsibilities
//! - Hand out the currently selected candidate without blocking
//! - Verify the current candidate and fail over when it stops answering
//! - Serialize failover scans: concurrent triggers collapse into one run

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time;

use crate::config::SelectorConfig;
use crate::fetch::HttpStreamFetcher;
use crate::observability::metrics;
use crate::selector::backoff::{self, BackoffPolicy, Pause};
use crate::selector::probe::{HealthProbe, StreamProbe};
use crate::selector::state::{ReselectFlag, ReselectState};
use crate::selector::types::{ReselectOutcome, SelectorError, SelectorResult, VerifyOutcome};
use crate::selector::url::{ClusterInfoUrlBuilder, ProbeUrlBuilder};

/// Sentinel index for "no selection yet".
const UNSET: usize = usize::MAX;

/// Tracks which of an ordered list of redundant endpoints is believed reachable.
///
/// Share it between callers through an `Arc`. Reads never wait on a running
/// failover scan, so a caller may briefly see the endpoint that is being
/// replaced.
pub struct EndpointSelector {
    /// Ordered candidates; index 0 is the preferred endpoint.
    candidates: Vec<String>,
    /// Index of the current selection, or `UNSET`.
    selected: AtomicUsize,
    reselect: ReselectFlag,
    probe: Arc<dyn HealthProbe>,
    url_builder: Arc<dyn ProbeUrlBuilder>,
    policy: BackoffPolicy,
    /// Optional bound on a whole scan.
    deadline: Option<Duration>,
    /// Wakes a scan out of its backoff pause.
    interrupt: Notify,
}

impl EndpointSelector {
    /// Create a selector with the default backoff policy and no deadline.
    pub fn new(
        candidates: Vec<String>,
        probe: Arc<dyn HealthProbe>,
        url_builder: Arc<dyn ProbeUrlBuilder>,
    ) -> SelectorResult<Self> {
        if candidates.is_empty() {
            return Err(SelectorError::NoCandidates);
        }

        Ok(Self {
            candidates,
            selected: AtomicUsize::new(UNSET),
            reselect: ReselectFlag::new(),
            probe,
            url_builder,
            policy: BackoffPolicy::default(),
            deadline: None,
            interrupt: Notify::new(),
        })
    }

    /// Create a selector probing over HTTP as described by `config`.
    pub fn from_config(config: &SelectorConfig) -> SelectorResult<Self> {
        let probe = StreamProbe::new(
            HttpStreamFetcher::new(),
            config.compression,
            config.probe.timeout(),
        );
        let url_builder = ClusterInfoUrlBuilder::new(config.probe.path.clone(), config.probe.anonymous);

        let selector = Self::new(config.candidates.clone(), Arc::new(probe), Arc::new(url_builder))?
            .with_backoff(BackoffPolicy::from(&config.backoff))
            .with_deadline(config.reselect_deadline());
        Ok(selector)
    }

    pub fn with_backoff(mut self, policy: BackoffPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn backoff(&self) -> BackoffPolicy {
        self.policy
    }

    /// The endpoint to use for real work.
    ///
    /// Lazily selects the first candidate, without probing it, on first call.
    pub fn current_endpoint(&self) -> &str {
        let index = match self
            .selected
            .compare_exchange(UNSET, 0, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                metrics::record_selected_candidate(0);
                0
            }
            Err(index) => index,
        };
        &self.candidates[index]
    }

    /// True while a failover scan is running.
    pub fn is_reselecting(&self) -> bool {
        self.reselect.load() == ReselectState::Reselecting
    }

    /// Cut the running scan's current backoff pause short.
    ///
    /// The scan continues with its next attempt.
    pub fn interrupt_backoff(&self) {
        self.interrupt.notify_waiters();
    }

    /// Probe the current endpoint and fail over if it does not answer.
    pub async fn verify(&self) -> SelectorResult<VerifyOutcome> {
        let current = self.current_endpoint();
        let url = self.url_builder.build(current);

        if self.probe(&url).await {
            return Ok(VerifyOutcome::Healthy);
        }

        tracing::warn!(endpoint = %current, "Current endpoint failed verification");
        match self.reselect().await? {
            ReselectOutcome::Selected(to) => Ok(VerifyOutcome::Switched {
                from: current.to_string(),
                to,
            }),
            ReselectOutcome::AlreadyInProgress => Ok(VerifyOutcome::ReselectInProgress),
        }
    }

    /// Liveness check of a single URL. Never fails.
    pub async fn probe(&self, url: &str) -> bool {
        self.probe.probe(url).await
    }

    /// Scan all candidates, in configured order, and install the first one that answers.
    ///
    /// Returns `AlreadyInProgress` without probing anything when another caller
    /// is already scanning.
    pub async fn reselect(&self) -> SelectorResult<ReselectOutcome> {
        let Some(_guard) = self.reselect.try_acquire() else {
            tracing::debug!("Reselection already in progress, skipping");
            metrics::record_reselection("skipped");
            return Ok(ReselectOutcome::AlreadyInProgress);
        };

        tracing::info!(candidates = self.candidates.len(), "Going to reselect endpoint");

        let result = match self.deadline {
            Some(deadline) => match time::timeout(deadline, self.scan()).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::error!(deadline_ms = deadline.as_millis() as u64, "Reselection deadline exceeded");
                    Err(SelectorError::DeadlineExceeded(deadline))
                }
            },
            None => self.scan().await,
        };

        metrics::record_reselection(match &result {
            Ok(_) => "selected",
            Err(SelectorError::DeadlineExceeded(_)) => "deadline",
            Err(_) => "exhausted",
        });
        result
    }

    async fn scan(&self) -> SelectorResult<ReselectOutcome> {
        let attempts = self.policy.max_attempts_per_candidate;
        let last = self.candidates.len() - 1;

        for (index, candidate) in self.candidates.iter().enumerate() {
            let url = self.url_builder.build(candidate);

            for attempt in 1..=attempts {
                if self.probe(&url).await {
                    self.selected.store(index, Ordering::Release);
                    metrics::record_selected_candidate(index);
                    tracing::info!(endpoint = %candidate, index, "Switched to endpoint");
                    return Ok(ReselectOutcome::Selected(candidate.clone()));
                }

                // Nothing left to wait for after the final attempt of the final candidate.
                if index == last && attempt == attempts {
                    break;
                }

                tracing::info!(
                    endpoint = %candidate,
                    attempt,
                    delay_ms = self.policy.delay.as_millis() as u64,
                    "Probe attempt failed, pausing before next attempt"
                );
                if backoff::pause(self.policy.delay, &self.interrupt).await == Pause::Interrupted {
                    tracing::warn!(endpoint = %candidate, attempt, "Backoff pause interrupted, continuing");
                    metrics::record_backoff_interrupt();
                }
            }
        }

        tracing::error!(candidates = %self.candidates.join(";"), "No alive endpoint found");
        Err(SelectorError::NoAliveEndpoint {
            candidates: self.candidates.clone(),
        })
    }
}

impl std::fmt::Debug for EndpointSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointSelector")
            .field("candidates", &self.candidates)
            .field("selected", &self.selected.load(Ordering::Acquire))
            .field("reselect", &self.reselect.load())
            .field("policy", &self.policy)
            .field("deadline", &self.deadline)
            .finish()
    }
}
