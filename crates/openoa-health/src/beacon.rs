//! Health beacon: a background task that repeatedly probes the health
//! endpoint and publishes a tri-state reachability signal.
//!
//! The beacon owns the only writer of its [`HealthState`]. Any number of
//! readers subscribe through [`HealthWatch`]. Cancelling the beacon takes
//! the writer away under a lock, so once [`BeaconHandle::cancel`] returns
//! no tick (including one already in flight) can change the state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use openoa_client::ProbeFn;

use crate::tracker::{BeaconTracker, HealthState};

/// The state writer, present while the beacon is active.
type Gate = Arc<Mutex<Option<watch::Sender<HealthState>>>>;

fn lock(gate: &Gate) -> MutexGuard<'_, Option<watch::Sender<HealthState>>> {
    gate.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Starts health beacons.
pub struct HealthBeacon;

impl HealthBeacon {
    /// Spawn a beacon probing with `probe` every `interval`.
    ///
    /// The first probe runs immediately. Must be called inside a tokio
    /// runtime.
    pub fn start(probe: ProbeFn, interval: Duration) -> BeaconHandle {
        let (state_tx, state_rx) = watch::channel(HealthState::Unknown);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let gate: Gate = Arc::new(Mutex::new(Some(state_tx)));

        let task = tokio::spawn(run_beacon_loop(probe, interval, gate.clone(), shutdown_rx));

        info!(interval = ?interval, "health beacon started");

        BeaconHandle {
            gate,
            state_rx,
            shutdown_tx,
            task: Some(task),
        }
    }
}

/// Handle to a running beacon. Dropping it cancels the beacon.
pub struct BeaconHandle {
    gate: Gate,
    state_rx: watch::Receiver<HealthState>,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl BeaconHandle {
    /// Read-only view of the beacon state.
    pub fn subscribe(&self) -> HealthWatch {
        HealthWatch {
            rx: self.state_rx.clone(),
        }
    }

    pub fn current(&self) -> HealthState {
        *self.state_rx.borrow()
    }

    pub fn is_active(&self) -> bool {
        lock(&self.gate).is_some()
    }

    /// Stop the beacon. Idempotent.
    ///
    /// After this returns the state is frozen: the timer stops and the
    /// result of any tick still in flight is discarded.
    pub fn cancel(&self) {
        let writer = lock(&self.gate).take();
        let _ = self.shutdown_tx.send(true);
        if writer.is_some() {
            info!(state = ?self.current(), "health beacon cancelled");
        }
    }

    /// Cancel and wait for the background task to finish.
    pub async fn shutdown(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for BeaconHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Subscription to a beacon's [`HealthState`].
#[derive(Clone)]
pub struct HealthWatch {
    rx: watch::Receiver<HealthState>,
}

impl HealthWatch {
    pub fn current(&self) -> HealthState {
        *self.rx.borrow()
    }

    /// Wait for the next state write.
    ///
    /// Returns `None` once the beacon has been cancelled.
    pub async fn changed(&mut self) -> Option<HealthState> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

async fn run_beacon_loop(
    probe: ProbeFn,
    interval: Duration,
    gate: Gate,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut tracker = BeaconTracker::new();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => {
                debug!("health beacon loop shutting down");
                break;
            }
            _ = ticker.tick() => {}
        }
        if lock(&gate).is_none() {
            debug!("health beacon cancelled before tick");
            break;
        }

        let outcome = probe().await;

        let guard = lock(&gate);
        let Some(writer) = guard.as_ref() else {
            debug!(ok = outcome.is_ok(), "discarding tick resolved after cancel");
            break;
        };
        let state = tracker.record(&outcome);
        writer.send_replace(state);
        debug!(?state, tick = tracker.ticks(), "health tick applied");
    }
}
