//! In-memory todo backend.

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::{BackendKind, TodoBackend};
use crate::domains::todos::error::TodoResult;
use crate::domains::todos::model::{NewTodo, TodoItem, TodoPatch};

/// Process-local list of todo items kept in insertion order.
///
/// The lock makes the backend safe to share across concurrently served
/// connections; contents are dropped with the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: RwLock<Vec<TodoItem>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl TodoBackend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    async fn insert(
        &self,
        id: ObjectId,
        new: NewTodo,
        now: DateTime<Utc>,
    ) -> TodoResult<TodoItem> {
        let item = TodoItem::from_new(id.to_hex(), new, now);
        self.items.write().await.push(item.clone());
        debug!("Stored todo {} in memory", item.id);
        Ok(item)
    }

    async fn find_all(&self) -> TodoResult<Vec<TodoItem>> {
        Ok(self.items.read().await.clone())
    }

    async fn find_one(&self, id: ObjectId) -> TodoResult<Option<TodoItem>> {
        let key = id.to_hex();
        Ok(self
            .items
            .read()
            .await
            .iter()
            .find(|item| item.id == key)
            .cloned())
    }

    async fn apply_patch(
        &self,
        id: ObjectId,
        patch: &TodoPatch,
        now: DateTime<Utc>,
    ) -> TodoResult<Option<TodoItem>> {
        let key = id.to_hex();
        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|item| item.id == key).map(|item| {
            item.apply(patch, now);
            item.clone()
        }))
    }

    async fn remove(&self, id: ObjectId) -> TodoResult<bool> {
        let key = id.to_hex();
        let mut items = self.items.write().await;
        match items.iter().position(|item| item.id == key) {
            Some(index) => {
                items.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::todos::model::now;

    #[tokio::test]
    async fn test_insertion_order_is_kept() {
        let backend = MemoryBackend::new();
        for title in ["first", "second", "third"] {
            backend
                .insert(ObjectId::new(), NewTodo::new(title), now())
                .await
                .unwrap();
        }

        let titles: Vec<_> = backend
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_patch_unknown_id() {
        let backend = MemoryBackend::new();
        let result = backend
            .apply_patch(ObjectId::new(), &TodoPatch::completed(true), now())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_remove_only_matching_item() {
        let backend = MemoryBackend::new();
        let keep = backend
            .insert(ObjectId::new(), NewTodo::new("keep"), now())
            .await
            .unwrap();
        let drop_id = ObjectId::new();
        backend
            .insert(drop_id, NewTodo::new("drop"), now())
            .await
            .unwrap();

        assert!(backend.remove(drop_id).await.unwrap());
        assert!(!backend.remove(drop_id).await.unwrap());
        assert_eq!(backend.len().await, 1);
        assert_eq!(backend.find_all().await.unwrap()[0].id, keep.id);
    }
}
