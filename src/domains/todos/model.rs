//! Todo item data model.
//!
//! `TodoItem` is the only entity. `NewTodo` and `TodoPatch` are the inputs to
//! the create and update operations of [`TodoStore`](super::TodoStore).

use chrono::{DateTime, Duration, SubsecRound, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Priority assigned when the caller does not provide one.
pub const DEFAULT_PRIORITY: &str = "medium";

/// A stored todo item.
///
/// Identifiers are 24-character hex ObjectIds regardless of which backend
/// produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TodoItem {
    /// Unique identifier, immutable after creation.
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Priority level. Usually `low`, `medium` or `high`, but stored as given.
    pub priority: String,
}

impl TodoItem {
    /// Build a fresh item from creation fields.
    ///
    /// `completed` starts false and both timestamps share the same instant.
    pub fn from_new(id: String, new: NewTodo, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            completed: false,
            created_at: now,
            updated_at: now,
            due_date: new.due_date,
            priority: new.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        }
    }

    /// Merge the mentioned fields of `patch` into this item and stamp
    /// `updated_at`.
    pub fn apply(&mut self, patch: &TodoPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(due_date) = &patch.due_date {
            self.due_date = *due_date;
        }
        if let Some(priority) = &patch.priority {
            self.priority = priority.clone();
        }
        self.updated_at = now;
    }
}

/// Fields accepted when creating a todo item.
///
/// `title` is assumed to be validated (non-empty) by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<String>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// A partial update.
///
/// `None` means the field is not mentioned and stays untouched. For the
/// nullable fields the inner option distinguishes "clear" (`Some(None)`) from
/// "set" (`Some(Some(v))`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub priority: Option<String>,
}

impl TodoPatch {
    /// True when no field is mentioned at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Current time truncated to milliseconds, the resolution the document store
/// keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Stamp for a modification of an item last stamped at `previous`.
///
/// Always at least one millisecond after `previous`, so `updated_at` moves
/// forward even when two writes land in the same millisecond.
pub fn next_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    now().max(previous + Duration::milliseconds(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> TodoItem {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        TodoItem::from_new(
            "65f0c0ffee0000000000beef".to_string(),
            NewTodo::new("Buy milk").with_description("2 litres"),
            at,
        )
    }

    #[test]
    fn test_from_new_defaults() {
        let item = sample();
        assert!(!item.completed);
        assert_eq!(item.priority, DEFAULT_PRIORITY);
        assert_eq!(item.created_at, item.updated_at);
        assert_eq!(item.description.as_deref(), Some("2 litres"));
    }

    #[test]
    fn test_apply_leaves_unmentioned_fields() {
        let mut item = sample();
        let before = item.clone();
        let later = item.created_at + chrono::Duration::minutes(5);

        item.apply(&TodoPatch::title("Buy almond milk"), later);

        assert_eq!(item.title, "Buy almond milk");
        assert_eq!(item.description, before.description);
        assert_eq!(item.completed, before.completed);
        assert_eq!(item.priority, before.priority);
        assert_eq!(item.created_at, before.created_at);
        assert_eq!(item.updated_at, later);
    }

    #[test]
    fn test_apply_clears_nullable_fields() {
        let mut item = sample();
        let patch = TodoPatch {
            description: Some(None),
            ..Default::default()
        };
        item.apply(&patch, item.created_at);
        assert!(item.description.is_none());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TodoPatch::default().is_empty());
        assert!(!TodoPatch::completed(true).is_empty());
        let clear_only = TodoPatch {
            due_date: Some(None),
            ..Default::default()
        };
        assert!(!clear_only.is_empty());
    }

    #[test]
    fn test_unknown_priority_is_kept() {
        let at = Utc::now();
        let item = TodoItem::from_new(
            "65f0c0ffee0000000000beef".to_string(),
            NewTodo::new("x").with_priority("urgent"),
            at,
        );
        assert_eq!(item.priority, "urgent");
    }

    #[test]
    fn test_next_stamp_advances_past_future_previous() {
        let ahead = now() + Duration::seconds(30);
        assert_eq!(next_stamp(ahead), ahead + Duration::milliseconds(1));

        let behind = now() - Duration::seconds(30);
        assert!(next_stamp(behind) > behind + Duration::milliseconds(1));
    }

    #[test]
    fn test_now_has_millisecond_resolution() {
        let t = now();
        assert_eq!(t.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
