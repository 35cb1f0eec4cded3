//! Normalized transport failures.
//!
//! Every failure the client can hit is folded into [`TransportError`]:
//! no raw hyper or I/O error escapes to callers.

use std::time::Duration;

use thiserror::Error;

/// Message shown whenever no response was received at all.
pub const UNREACHABLE_MESSAGE: &str =
    "Backend server is not reachable. Is it running on port 8000?";

/// Errors produced by [`ApiClient`](crate::ApiClient) calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response received: connection refused, DNS failure, reset.
    #[error("Backend server is not reachable. Is it running on port 8000?")]
    Unreachable { reason: String },

    /// No response within the configured timeout.
    #[error("Backend server is not reachable. Is it running on port 8000?")]
    Timeout { after: Duration },

    /// A response arrived with a non-2xx status.
    #[error("{}", server_message(.status, .detail))]
    Server { status: u16, detail: Option<String> },

    /// A 2xx body did not match the expected shape.
    #[error("unexpected response body (status {status}): {reason}")]
    Decode { status: u16, reason: String },

    /// The request could not be built (bad path or header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

fn server_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("Request failed with status code {status}"),
    }
}

impl TransportError {
    /// HTTP status, present only when a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Server { status, .. } | TransportError::Decode { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Human-readable message for display.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether this failure means the backend could not be reached.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            TransportError::Unreachable { .. } | TransportError::Timeout { .. }
        )
    }
}
