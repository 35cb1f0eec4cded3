//! openoa-health — background reachability beacon for the OpenOA API.
//!
//! The beacon probes the health endpoint on a fixed interval and exposes a
//! tri-state signal for persistent navigation chrome. It shares only the
//! transport client with the diagnostics sweep; neither affects the other.
//!
//! # Architecture
//!
//! ```text
//! HealthBeacon::start(probe, interval) → BeaconHandle
//!   ├── background tokio task
//!   │   ├── interval tick (first tick immediate)
//!   │   ├── probe() → TransportOutcome
//!   │   └── BeaconTracker::record → HealthState (Unknown → Up ⇄ Down)
//!   ├── subscribe() → HealthWatch (read-only, any number of readers)
//!   └── cancel() / drop → writer removed, in-flight tick discarded
//! ```

pub mod beacon;
pub mod tracker;

pub use beacon::{BeaconHandle, HealthBeacon, HealthWatch};
pub use tracker::{BeaconTracker, HealthState};
