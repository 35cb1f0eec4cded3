//! openoa-diagnostics — endpoint diagnostics for the OpenOA API.
//!
//! Runs every probe in a fixed [`Registry`] one at a time, in order, and
//! keeps the latest [`ProbeResult`] per endpoint. Aggregate counts and
//! average latency are derived on demand.
//!
//! # Architecture
//!
//! ```text
//! Registry (ordered ProbeDescriptors, one health probe)
//!   └── Diagnostics
//!       ├── test_one(id)  → Pending → Success | Failure
//!       ├── test_all()    → run_in_order over the registry, no overlap
//!       ├── activate()    → first sweep, once
//!       └── subscribe()   → watch::Receiver<DiagnosticsSnapshot>
//! ```

pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod sequence;

pub use error::{DiagnosticsError, RegistryError};
pub use orchestrator::{
    AggregateStats, Diagnostics, DiagnosticsSnapshot, ProbeResult, SweepEntry, SweepReport,
};
pub use registry::{
    CONTACT_PROBE_ID, DETAIL_METHOD_ID, HEALTH_PROBE_ID, ProbeDescriptor, Registry, RegistryBuilder,
    default_contact_sample,
};
pub use sequence::run_in_order;
