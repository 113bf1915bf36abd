//! The todo store.
//!
//! `TodoStore` is the single point of access to todo items. On first use it
//! decides, once, whether to talk to MongoDB or keep items in memory:
//!
//! 1. `use_memory` set -> memory
//! 2. no connection string -> memory
//! 3. connect with a bounded timeout -> MongoDB, or memory on any failure
//!
//! The choice is fixed for the life of the store. Errors raised by MongoDB
//! after it was selected are returned to the caller as-is.

use bson::oid::ObjectId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use super::backend::{BackendKind, MemoryBackend, MongoBackend, TodoBackend};
use super::error::{TodoError, TodoResult};
use super::events::{BackendSelection, SelectionReason, StoreObserver};
use super::model::{self, NewTodo, TodoItem, TodoPatch};
use crate::core::config::StorageConfig;

/// Todo item store over a lazily selected backend.
pub struct TodoStore {
    config: StorageConfig,
    backend: OnceCell<Box<dyn TodoBackend>>,
    observers: Vec<StoreObserver>,
    closed: AtomicBool,
}

impl TodoStore {
    /// Create a store. No connection is attempted until first use or `open()`.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            backend: OnceCell::new(),
            observers: Vec::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// A store that always keeps items in memory.
    pub fn in_memory() -> Self {
        Self::new(StorageConfig {
            use_memory: true,
            ..Default::default()
        })
    }

    /// Register a callback notified when the backend is selected.
    pub fn with_observer(mut self, observer: StoreObserver) -> Self {
        self.observers.push(observer);
        self
    }

    /// Resolve the backend now instead of on first operation.
    pub async fn open(&self) -> TodoResult<BackendKind> {
        Ok(self.backend().await?.kind())
    }

    /// Release the backend. Any later operation fails with `TodoError::Closed`.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(backend) = self.backend.get() {
            backend.close().await;
        }
    }

    /// The selected backend, if selection already happened.
    pub fn backend_kind(&self) -> Option<BackendKind> {
        self.backend.get().map(|backend| backend.kind())
    }

    #[instrument(skip_all, fields(title = %new.title))]
    pub async fn create(&self, new: NewTodo) -> TodoResult<TodoItem> {
        let item = self
            .backend()
            .await?
            .insert(ObjectId::new(), new, model::now())
            .await?;
        debug!("Created todo {}", item.id);
        Ok(item)
    }

    /// Every item, in the backend's native order.
    pub async fn get_all(&self) -> TodoResult<Vec<TodoItem>> {
        self.backend().await?.find_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> TodoResult<Option<TodoItem>> {
        let backend = self.backend().await?;
        match parse_id(id) {
            Some(oid) => backend.find_one(oid).await,
            None => Ok(None),
        }
    }

    /// Apply a partial update and return the updated item.
    ///
    /// An empty patch writes nothing and returns `None`, the same as an
    /// unknown id. `updated_at` always ends up later than it was before.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: TodoPatch) -> TodoResult<Option<TodoItem>> {
        let backend = self.backend().await?;
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        if patch.is_empty() {
            debug!("Empty patch for {}, nothing to update", id);
            return Ok(None);
        }
        let Some(current) = backend.find_one(oid).await? else {
            return Ok(None);
        };
        let stamp = model::next_stamp(current.updated_at);
        backend.apply_patch(oid, &patch, stamp).await
    }

    pub async fn delete(&self, id: &str) -> TodoResult<bool> {
        let backend = self.backend().await?;
        match parse_id(id) {
            Some(oid) => backend.remove(oid).await,
            None => Ok(false),
        }
    }

    /// Flip `completed` through the regular update path.
    pub async fn toggle(&self, id: &str) -> TodoResult<Option<TodoItem>> {
        let Some(current) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        self.update(id, TodoPatch::completed(!current.completed)).await
    }

    async fn backend(&self) -> TodoResult<&dyn TodoBackend> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(TodoError::Closed);
        }
        let backend = self.backend.get_or_init(|| self.select_backend()).await;
        Ok(backend.as_ref())
    }

    async fn select_backend(&self) -> Box<dyn TodoBackend> {
        let (backend, reason): (Box<dyn TodoBackend>, SelectionReason) = if self.config.use_memory
        {
            (Box::new(MemoryBackend::new()), SelectionReason::ForcedMemory)
        } else if let Some(uri) = self.config.uri.as_deref() {
            let limit = Duration::from_millis(self.config.connect_timeout_ms);
            match tokio::time::timeout(limit, MongoBackend::connect(uri, &self.config)).await {
                Ok(Ok(mongo)) => (
                    Box::new(mongo),
                    SelectionReason::Connected {
                        database: self.config.database.clone(),
                    },
                ),
                Ok(Err(e)) => (
                    Box::new(MemoryBackend::new()),
                    SelectionReason::ConnectFailed {
                        error: e.to_string(),
                    },
                ),
                Err(_) => (
                    Box::new(MemoryBackend::new()),
                    SelectionReason::ConnectFailed {
                        error: format!("timed out after {}ms", self.config.connect_timeout_ms),
                    },
                ),
            }
        } else {
            (
                Box::new(MemoryBackend::new()),
                SelectionReason::NoConnectionString,
            )
        };

        let selection = BackendSelection {
            kind: backend.kind(),
            reason,
        };
        for observer in &self.observers {
            observer(&selection);
        }
        backend
    }
}

fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
