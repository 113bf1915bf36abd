//! Todo storage error types.

use thiserror::Error;

/// Result type for todo store operations.
pub type TodoResult<T> = Result<T, TodoError>;

/// Errors surfaced by the todo store.
///
/// Malformed identifiers are never errors; they resolve to "not found".
#[derive(Debug, Error)]
pub enum TodoError {
    /// The persistent backend failed mid-operation. Not retried.
    #[error("Database error: {0}")]
    Backend(#[from] mongodb::error::Error),

    /// The store was used after `close()`.
    #[error("Todo store is closed")]
    Closed,
}
