//! Backend selection events.
//!
//! The store reports which backend it resolved to, and why, to any number of
//! observers. It never logs the decision itself.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::backend::BackendKind;

/// Why a backend was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SelectionReason {
    /// In-memory mode was requested explicitly.
    ForcedMemory,
    /// No connection string was configured.
    NoConnectionString,
    /// The persistent store answered within the timeout.
    Connected { database: String },
    /// Connecting failed; the store fell back to memory.
    ConnectFailed { error: String },
}

/// Emitted once per store when its backend is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendSelection {
    pub kind: BackendKind,
    #[serde(flatten)]
    pub reason: SelectionReason,
}

impl BackendSelection {
    pub fn is_fallback(&self) -> bool {
        matches!(self.reason, SelectionReason::ConnectFailed { .. })
    }
}

impl fmt::Display for BackendSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            SelectionReason::ForcedMemory => {
                write!(f, "using {} storage (requested)", self.kind)
            }
            SelectionReason::NoConnectionString => {
                write!(f, "using {} storage (no connection string)", self.kind)
            }
            SelectionReason::Connected { database } => {
                write!(f, "using {} storage (database '{}')", self.kind, database)
            }
            SelectionReason::ConnectFailed { error } => {
                write!(f, "falling back to {} storage: {}", self.kind, error)
            }
        }
    }
}

/// Callback invoked with the selection outcome.
pub type StoreObserver = Arc<dyn Fn(&BackendSelection) + Send + Sync>;
