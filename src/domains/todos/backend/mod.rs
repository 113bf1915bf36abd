//! Storage backends behind [`TodoStore`](super::TodoStore).
//!
//! - `memory` - process-local list, lost on exit
//! - `mongo` - MongoDB collection, survives restarts
//!
//! Both receive identifiers already parsed into an [`ObjectId`], so a
//! malformed identifier never reaches a backend.

mod memory;
mod mongo;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::error::TodoResult;
use super::model::{NewTodo, TodoItem, TodoPatch};

pub use memory::MemoryBackend;
pub use mongo::MongoBackend;

/// Which backend a store resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    Mongo,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "in-memory"),
            Self::Mongo => write!(f, "mongodb"),
        }
    }
}

/// Operations every todo backend provides.
#[async_trait]
pub trait TodoBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Store a new item under `id`, returning it as stored.
    async fn insert(&self, id: ObjectId, new: NewTodo, now: DateTime<Utc>)
    -> TodoResult<TodoItem>;

    /// All items in backend order.
    async fn find_all(&self) -> TodoResult<Vec<TodoItem>>;

    async fn find_one(&self, id: ObjectId) -> TodoResult<Option<TodoItem>>;

    /// Merge a non-empty patch and return the re-read item, or `None` when
    /// no item has this id.
    async fn apply_patch(
        &self,
        id: ObjectId,
        patch: &TodoPatch,
        now: DateTime<Utc>,
    ) -> TodoResult<Option<TodoItem>>;

    /// Returns whether an item was removed.
    async fn remove(&self, id: ObjectId) -> TodoResult<bool>;

    /// Release any held connection.
    async fn close(&self) {}
}
