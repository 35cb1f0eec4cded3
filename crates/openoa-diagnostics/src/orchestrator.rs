//! Diagnostics orchestrator — runs registry probes and keeps the
//! per-endpoint result map.
//!
//! State is published through a `watch` channel after every transition
//! (cleared, pending, resolved, sweep flag), so subscribers see in-flight
//! probes and not just final results.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use openoa_client::TransportOutcome;

use crate::error::DiagnosticsError;
use crate::registry::{ProbeDescriptor, Registry};
use crate::sequence::run_in_order;

/// Latest known outcome for one probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeResult {
    /// Probe in flight.
    Pending,
    Success {
        status_code: u16,
        duration_ms: u64,
        payload: Value,
    },
    Failure {
        status_code: Option<u16>,
        duration_ms: u64,
        error_message: String,
    },
}

impl ProbeResult {
    pub fn from_outcome(outcome: TransportOutcome, duration_ms: u64) -> Self {
        match outcome {
            Ok(response) => ProbeResult::Success {
                status_code: response.status,
                duration_ms,
                payload: response.body,
            },
            Err(err) => ProbeResult::Failure {
                status_code: err.status_code(),
                duration_ms,
                error_message: err.message(),
            },
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ProbeResult::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ProbeResult::Failure { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProbeResult::Pending => None,
            ProbeResult::Success { status_code, .. } => Some(*status_code),
            ProbeResult::Failure { status_code, .. } => *status_code,
        }
    }

    /// Duration of a resolved probe; `None` while pending.
    pub fn duration_ms(&self) -> Option<u64> {
        match self {
            ProbeResult::Pending => None,
            ProbeResult::Success { duration_ms, .. } | ProbeResult::Failure { duration_ms, .. } => {
                Some(*duration_ms)
            }
        }
    }
}

/// Counts derived from a result map. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateStats {
    pub success_count: usize,
    pub error_count: usize,
    pub total_tested: usize,
    /// Mean duration of resolved probes; `None` when nothing has resolved.
    pub average_latency_ms: Option<f64>,
}

impl AggregateStats {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ProbeResult>) -> Self {
        let mut success_count = 0;
        let mut error_count = 0;
        let mut total_ms = 0u64;
        let mut timed = 0usize;

        for result in results {
            match result {
                ProbeResult::Pending => continue,
                ProbeResult::Success { .. } => success_count += 1,
                ProbeResult::Failure { .. } => error_count += 1,
            }
            if let Some(ms) = result.duration_ms() {
                total_ms += ms;
                timed += 1;
            }
        }

        let total_tested = success_count + error_count;
        let average_latency_ms = (total_tested > 0 && timed > 0)
            .then(|| total_ms as f64 / timed as f64);

        Self {
            success_count,
            error_count,
            total_tested,
            average_latency_ms,
        }
    }
}

/// Observable orchestrator state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagnosticsSnapshot {
    /// At most one entry per probe id.
    pub results: HashMap<String, ProbeResult>,
    /// True while a full sweep is running.
    pub sweeping: bool,
}

impl DiagnosticsSnapshot {
    pub fn result(&self, id: &str) -> Option<&ProbeResult> {
        self.results.get(id)
    }

    pub fn aggregate(&self) -> AggregateStats {
        AggregateStats::from_results(self.results.values())
    }
}

/// One probe's outcome within a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepEntry {
    pub id: String,
    pub result: ProbeResult,
}

/// Results of one full sweep, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub entries: Vec<SweepEntry>,
    pub elapsed_ms: u64,
}

impl SweepReport {
    pub fn aggregate(&self) -> AggregateStats {
        AggregateStats::from_results(self.entries.iter().map(|e| &e.result))
    }
}

/// Runs probes against a [`Registry`] and owns the result map.
pub struct Diagnostics {
    registry: Arc<Registry>,
    state: watch::Sender<DiagnosticsSnapshot>,
    sweeping: AtomicBool,
    activated: AtomicBool,
}

impl Diagnostics {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            state: watch::Sender::new(DiagnosticsSnapshot::default()),
            sweeping: AtomicBool::new(false),
            activated: AtomicBool::new(false),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Receiver notified after every state transition.
    pub fn subscribe(&self) -> watch::Receiver<DiagnosticsSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        self.state.borrow().clone()
    }

    pub fn aggregate(&self) -> AggregateStats {
        self.state.borrow().aggregate()
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeping.load(Ordering::SeqCst)
    }

    /// Trigger the initial full sweep. Only the first call does anything.
    pub fn activate(
        self: &Arc<Self>,
    ) -> Option<JoinHandle<Result<SweepReport, DiagnosticsError>>> {
        if self.activated.swap(true, Ordering::SeqCst) {
            return None;
        }
        let this = Arc::clone(self);
        Some(tokio::spawn(async move { this.test_all().await }))
    }

    /// Probe a single endpoint by id.
    pub async fn test_one(&self, id: &str) -> Result<ProbeResult, DiagnosticsError> {
        let descriptor = self
            .registry
            .get(id)
            .cloned()
            .ok_or_else(|| DiagnosticsError::UnknownProbe(id.to_string()))?;
        Ok(self.run_probe(&descriptor).await)
    }

    /// Probe every endpoint sequentially, in registry order.
    ///
    /// Returns [`DiagnosticsError::SweepInProgress`] if another sweep is
    /// running. A failing probe never stops the sweep.
    pub async fn test_all(&self) -> Result<SweepReport, DiagnosticsError> {
        let _guard = SweepGuard::acquire(&self.sweeping, &self.state).ok_or_else(|| {
            warn!("sweep rejected: another sweep is in progress");
            DiagnosticsError::SweepInProgress
        })?;

        self.state.send_modify(|s| {
            s.results.clear();
            s.sweeping = true;
        });

        info!(probes = self.registry.len(), "sweep started");
        let started = Instant::now();

        let entries = run_in_order(self.registry.iter(), |descriptor| async move {
            SweepEntry {
                id: descriptor.id().to_string(),
                result: self.run_probe(descriptor).await,
            }
        })
        .await;

        let report = SweepReport {
            entries,
            elapsed_ms: round_ms(started.elapsed()),
        };
        let stats = report.aggregate();
        info!(
            success = stats.success_count,
            errors = stats.error_count,
            elapsed_ms = report.elapsed_ms,
            "sweep finished"
        );
        Ok(report)
    }

    async fn run_probe(&self, descriptor: &ProbeDescriptor) -> ProbeResult {
        let id = descriptor.id().to_string();
        self.state.send_modify(|s| {
            s.results.insert(id.clone(), ProbeResult::Pending);
        });

        let started = Instant::now();
        let outcome = (descriptor.invoke())().await;
        let duration_ms = round_ms(started.elapsed());

        let result = ProbeResult::from_outcome(outcome, duration_ms);
        debug!(
            probe = %id,
            ok = result.is_success(),
            status = ?result.status_code(),
            duration_ms,
            "probe resolved"
        );

        self.state.send_modify(|s| {
            s.results.insert(id, result.clone());
        });
        result
    }
}

/// Holds the sweep flag; clears it (and the published flag) on drop.
struct SweepGuard<'a> {
    flag: &'a AtomicBool,
    state: &'a watch::Sender<DiagnosticsSnapshot>,
}

impl<'a> SweepGuard<'a> {
    fn acquire(flag: &'a AtomicBool, state: &'a watch::Sender<DiagnosticsSnapshot>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag, state })
    }
}

impl Drop for SweepGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.sweeping = false);
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn round_ms(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}
