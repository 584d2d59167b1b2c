//! Error types for the tree store.

use thiserror::Error;

/// Failures surfaced by [`crate::TreeStore`] operations.
///
/// Structural errors are recovered at the operation boundary: the store
/// rejects the operation, leaves the map untouched, and the caller (the
/// UI layer) decides how to surface it. Silent no-ops on missing ids are
/// deliberately not an option.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent container not found: {0}")]
    ParentNotFound(String),

    #[error("Unknown page: {0}")]
    PageMismatch(String),

    #[error("Node is not a field: {0}")]
    NotAField(String),

    #[error("Node is not a container: {0}")]
    NotAContainer(String),

    #[error("Move would create a cycle")]
    CycleDetected,

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}
