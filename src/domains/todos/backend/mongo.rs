//! MongoDB todo backend.
//!
//! Items live in one collection as documents keyed by `_id: ObjectId`, with
//! BSON datetimes for the timestamp fields.

use async_trait::async_trait;
use bson::{Document, doc, oid::ObjectId};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{Client, Collection, options::ClientOptions};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{BackendKind, TodoBackend};
use crate::core::config::StorageConfig;
use crate::domains::todos::error::TodoResult;
use crate::domains::todos::model::{DEFAULT_PRIORITY, NewTodo, TodoItem, TodoPatch};

/// Stored shape of a todo item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    completed: bool,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<bson::DateTime>,
    #[serde(default = "default_priority")]
    priority: String,
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

impl TodoDocument {
    fn new(id: ObjectId, new: NewTodo, now: DateTime<Utc>) -> Self {
        let stamp = bson::DateTime::from_chrono(now);
        Self {
            id,
            title: new.title,
            description: new.description,
            completed: false,
            created_at: stamp,
            updated_at: stamp,
            due_date: new.due_date.map(bson::DateTime::from_chrono),
            priority: new.priority.unwrap_or_else(default_priority),
        }
    }
}

impl From<TodoDocument> for TodoItem {
    fn from(doc: TodoDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            description: doc.description,
            completed: doc.completed,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
            due_date: doc.due_date.map(|d| d.to_chrono()),
            priority: doc.priority,
        }
    }
}

/// Build the update document for a patch: mentioned values go to `$set`,
/// cleared nullable fields go to `$unset`.
fn update_document(patch: &TodoPatch, now: DateTime<Utc>) -> Document {
    let mut set = doc! { "updated_at": bson::DateTime::from_chrono(now) };
    let mut unset = Document::new();

    if let Some(title) = &patch.title {
        set.insert("title", title.as_str());
    }
    match &patch.description {
        Some(Some(description)) => {
            set.insert("description", description.as_str());
        }
        Some(None) => {
            unset.insert("description", "");
        }
        None => {}
    }
    if let Some(completed) = patch.completed {
        set.insert("completed", completed);
    }
    match &patch.due_date {
        Some(Some(due)) => {
            set.insert("due_date", bson::DateTime::from_chrono(*due));
        }
        Some(None) => {
            unset.insert("due_date", "");
        }
        None => {}
    }
    if let Some(priority) = &patch.priority {
        set.insert("priority", priority.as_str());
    }

    let mut update = doc! { "$set": set };
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    update
}

/// Backend holding one MongoDB client for the lifetime of the store.
pub struct MongoBackend {
    client: Client,
    collection: Collection<TodoDocument>,
}

impl MongoBackend {
    /// Connect and verify the server answers a `ping`.
    ///
    /// Server selection and socket connection are both bounded by the
    /// configured timeout.
    pub async fn connect(uri: &str, config: &StorageConfig) -> TodoResult<Self> {
        let timeout = Duration::from_millis(config.connect_timeout_ms);

        let mut options = ClientOptions::parse(uri).await?;
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        client.database("admin").run_command(doc! { "ping": 1 }).await?;

        let collection = client
            .database(&config.database)
            .collection::<TodoDocument>(&config.collection);

        info!(
            database = %config.database,
            collection = %config.collection,
            "Connected to MongoDB"
        );

        Ok(Self { client, collection })
    }
}

#[async_trait]
impl TodoBackend for MongoBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Mongo
    }

    async fn insert(
        &self,
        id: ObjectId,
        new: NewTodo,
        now: DateTime<Utc>,
    ) -> TodoResult<TodoItem> {
        let document = TodoDocument::new(id, new, now);
        self.collection.insert_one(&document).await?;
        debug!("Inserted todo {}", id);
        Ok(document.into())
    }

    async fn find_all(&self) -> TodoResult<Vec<TodoItem>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<TodoDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(TodoItem::from).collect())
    }

    async fn find_one(&self, id: ObjectId) -> TodoResult<Option<TodoItem>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(TodoItem::from))
    }

    async fn apply_patch(
        &self,
        id: ObjectId,
        patch: &TodoPatch,
        now: DateTime<Utc>,
    ) -> TodoResult<Option<TodoItem>> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, update_document(patch, now))
            .await?;

        if result.matched_count == 0 {
            return Ok(None);
        }
        self.find_one(id).await
    }

    async fn remove(&self, id: ObjectId) -> TodoResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("Disconnected from MongoDB");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_document_converts_to_item() {
        let id = ObjectId::new();
        let document = TodoDocument::new(
            id,
            NewTodo::new("Water plants").with_due_date(at(18)),
            at(9),
        );

        let item = TodoItem::from(document);
        assert_eq!(item.id, id.to_hex());
        assert_eq!(item.priority, "medium");
        assert!(!item.completed);
        assert_eq!(item.created_at, at(9));
        assert_eq!(item.updated_at, at(9));
        assert_eq!(item.due_date, Some(at(18)));
    }

    #[test]
    fn test_document_defaults_for_sparse_records() {
        let id = ObjectId::new();
        let stamp = bson::DateTime::from_chrono(at(9));
        let raw = doc! {
            "_id": id,
            "title": "legacy",
            "description": bson::Bson::Null,
            "created_at": stamp,
            "updated_at": stamp,
        };

        let document: TodoDocument = bson::from_document(raw).unwrap();
        assert_eq!(document.priority, "medium");
        assert!(!document.completed);
        assert!(document.description.is_none());
    }

    #[test]
    fn test_update_document_sets_only_mentioned_fields() {
        let update = update_document(&TodoPatch::title("Buy almond milk"), at(10));

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("title").unwrap(), "Buy almond milk");
        assert!(set.contains_key("updated_at"));
        assert!(!set.contains_key("completed"));
        assert!(!set.contains_key("priority"));
        assert!(!update.contains_key("$unset"));
    }

    #[test]
    fn test_update_document_unsets_cleared_fields() {
        let patch = TodoPatch {
            description: Some(None),
            due_date: Some(None),
            completed: Some(true),
            ..Default::default()
        };
        let update = update_document(&patch, at(10));

        let set = update.get_document("$set").unwrap();
        assert!(set.get_bool("completed").unwrap());

        let unset = update.get_document("$unset").unwrap();
        assert!(unset.contains_key("description"));
        assert!(unset.contains_key("due_date"));
    }
}
