//! Error types for the counting engine.

use thiserror::Error;

/// Errors surfaced by index construction and batch dispatch.
///
/// Builder and pool failures abort the whole counting call. Per-query
/// failures ([`InvalidQuery`](CountError::InvalidQuery),
/// [`WorkerFailure`](CountError::WorkerFailure)) are recorded in the failing
/// query's result slot and leave sibling queries untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountError {
    /// Storage for the suffix index could not be obtained.
    #[error("failed to allocate storage for {entries} suffix entries")]
    Allocation { entries: usize },

    /// The query was rejected before any counting ran.
    #[error("invalid query {pattern:?}: {reason}")]
    InvalidQuery { pattern: String, reason: String },

    /// A counting unit failed internally.
    #[error("worker failed while counting {pattern:?}: {reason}")]
    WorkerFailure { pattern: String, reason: String },

    /// The per-call worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    PoolStart(String),
}

impl CountError {
    /// Convenience constructor for the empty-pattern rejection.
    pub(crate) fn empty_pattern() -> Self {
        CountError::InvalidQuery {
            pattern: String::new(),
            reason: "empty pattern".to_string(),
        }
    }
}
