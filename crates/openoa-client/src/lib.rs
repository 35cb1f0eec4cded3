//! openoa-client — HTTP transport for the OpenOA REST API.
//!
//! [`ApiClient`] wraps a base URL, a fixed per-call timeout, and JSON
//! content negotiation. Failures come back in two classes:
//!
//! ```text
//! no response (refused, DNS, timeout) → Unreachable / Timeout, status absent
//! non-2xx response                     → Server { status, detail }
//! ```

pub mod api;
pub mod error;
pub mod probe;
pub mod transport;

pub use error::{TransportError, UNREACHABLE_MESSAGE};
pub use probe::{ProbeFn, ProbeFuture, probe_fn};
pub use transport::{ApiClient, ApiResponse, TransportOutcome};
