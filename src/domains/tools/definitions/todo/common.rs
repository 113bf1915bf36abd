//! Common utilities shared across todo tools.
//!
//! Argument parsing, due-date parsing, and rendering of todo items into the
//! text + structured content returned to clients.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rmcp::model::{CallToolResult, Content};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::domains::todos::{TodoError, TodoItem};
use crate::domains::tools::ToolError;

/// Message returned when a due date cannot be parsed.
pub const INVALID_DUE_DATE: &str = "Invalid due_date format. Use ISO format.";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Naive layouts accepted after RFC 3339; interpreted as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Deserialize tool arguments into a params struct.
pub fn parse_params<T: DeserializeOwned>(arguments: serde_json::Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Keeps an explicit `null` distinct from an absent field.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parse an ISO-8601 date or datetime.
///
/// Accepts RFC 3339 (`Z` or an offset), a naive datetime, or a bare date
/// (midnight). Values without an offset are taken as UTC.
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn priority_marker(priority: &str) -> &'static str {
    match priority {
        "low" => "🟢",
        "high" => "🔴",
        _ => "🟡",
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Render a todo item as a human-readable block.
pub fn format_todo(todo: &TodoItem) -> String {
    let status = if todo.completed {
        "✅ Completed"
    } else {
        "⏳ Pending"
    };
    let due = todo
        .due_date
        .map(|d| format!(" (Due: {})", d.format(DISPLAY_FORMAT)))
        .unwrap_or_default();

    let mut text = format!(
        "ID: {}\nTitle: {}\nStatus: {}\nPriority: {} {}\n",
        todo.id,
        todo.title,
        status,
        priority_marker(&todo.priority),
        title_case(&todo.priority),
    );
    if let Some(description) = todo.description.as_deref().filter(|d| !d.is_empty()) {
        text.push_str(&format!("Description: {}\n", description));
    }
    text.push_str(&format!(
        "Created: {}\nUpdated: {}{}",
        todo.created_at.format(DISPLAY_FORMAT),
        todo.updated_at.format(DISPLAY_FORMAT),
        due
    ));
    text
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Tool result for a store failure.
pub fn store_error_result(error: &TodoError) -> CallToolResult {
    error_result(&format!("Error: {}", error))
}

/// Success result carrying a text summary and the structured payload.
pub fn structured_result<T: Serialize>(summary: String, data: &T) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(value) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(value),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => error_result(&format!("Error: failed to serialize result: {}", e)),
    }
}
