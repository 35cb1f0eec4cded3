//! Per-tick reachability bookkeeping for the health beacon.

use serde::Serialize;
use tracing::{info, warn};

use openoa_client::TransportOutcome;

/// Backend reachability as shown in persistent navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// No tick has resolved yet.
    #[default]
    Unknown,
    Up,
    Down,
}

impl HealthState {
    pub fn is_up(self) -> bool {
        self == HealthState::Up
    }
}

/// Tracks consecutive tick outcomes for the beacon.
///
/// Every tick decides the state on its own: one success is `Up`, one
/// failure of any kind is `Down`. The counters only feed logging.
#[derive(Debug, Default)]
pub struct BeaconTracker {
    state: HealthState,
    ticks: u64,
    consecutive_failures: u32,
}

impl BeaconTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tick outcome and return the new state.
    pub fn record(&mut self, outcome: &TransportOutcome) -> HealthState {
        self.ticks += 1;
        let next = match outcome {
            Ok(_) => {
                if self.state == HealthState::Down {
                    info!(
                        failures = self.consecutive_failures,
                        "backend reachable again"
                    );
                }
                self.consecutive_failures = 0;
                HealthState::Up
            }
            Err(_) => {
                self.consecutive_failures += 1;
                if self.state != HealthState::Down {
                    warn!(ticks = self.ticks, "backend unreachable");
                }
                HealthState::Down
            }
        };
        self.state = next;
        next
    }

    pub fn state(&self) -> HealthState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openoa_client::{ApiResponse, TransportError};

    fn ok() -> TransportOutcome {
        Ok(ApiResponse {
            status: 200,
            body: serde_json::Value::Null,
        })
    }

    fn refused() -> TransportOutcome {
        Err(TransportError::Unreachable {
            reason: "connection refused".to_string(),
        })
    }

    fn server_error() -> TransportOutcome {
        Err(TransportError::Server {
            status: 503,
            detail: None,
        })
    }

    #[test]
    fn tracker_starts_unknown() {
        let tracker = BeaconTracker::new();
        assert_eq!(tracker.state(), HealthState::Unknown);
        assert_eq!(tracker.ticks(), 0);
    }

    #[test]
    fn first_success_is_up() {
        let mut tracker = BeaconTracker::new();
        assert_eq!(tracker.record(&ok()), HealthState::Up);
    }

    #[test]
    fn any_failure_is_down() {
        let mut tracker = BeaconTracker::new();
        assert_eq!(tracker.record(&refused()), HealthState::Down);

        let mut tracker = BeaconTracker::new();
        tracker.record(&ok());
        assert_eq!(tracker.record(&server_error()), HealthState::Down);
    }

    #[test]
    fn flips_on_every_tick() {
        let mut tracker = BeaconTracker::new();
        tracker.record(&ok());
        tracker.record(&refused());
        tracker.record(&refused());
        assert_eq!(tracker.consecutive_failures(), 2);

        assert_eq!(tracker.record(&ok()), HealthState::Up);
        assert_eq!(tracker.consecutive_failures(), 0);
        assert_eq!(tracker.ticks(), 4);
    }
}
