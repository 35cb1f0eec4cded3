//! Error types for the diagnostics subsystem.

use thiserror::Error;

/// Errors raised while building a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate probe id: {0}")]
    DuplicateId(String),

    #[error("no health probe designated")]
    MissingHealthProbe,

    #[error("health probe already designated as {first}, cannot also designate {second}")]
    DuplicateHealthProbe { first: String, second: String },
}

/// Errors returned by [`Diagnostics`](crate::Diagnostics) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticsError {
    #[error("unknown probe: {0}")]
    UnknownProbe(String),

    #[error("a sweep is already in progress")]
    SweepInProgress,
}
