//! History Sanitization
//!
//! The caller's history arrives as untrusted JSON. Anything unusable is
//! dropped silently; sanitization never fails.

use serde_json::Value;

use crate::message::{Message, Role};

/// Number of trailing history messages forwarded to the provider
pub const MAX_HISTORY_MESSAGES: usize = 12;

/// Sanitize history with the default limit.
pub fn sanitize_history(value: &Value) -> Vec<Message> {
    sanitize_history_with_limit(value, MAX_HISTORY_MESSAGES)
}

/// Keep the last `limit` valid user/assistant entries of a JSON array, in order.
///
/// Non-array input yields an empty history.
pub fn sanitize_history_with_limit(value: &Value, limit: usize) -> Vec<Message> {
    let Some(entries) = value.as_array() else {
        if !value.is_null() {
            tracing::debug!("Ignoring non-array history");
        }
        return Vec::new();
    };

    let valid: Vec<Message> = entries.iter().filter_map(history_entry).collect();
    let dropped = entries.len() - valid.len();
    if dropped > 0 {
        tracing::debug!(dropped, "Dropped malformed history entries");
    }

    let skip = valid.len().saturating_sub(limit);
    valid.into_iter().skip(skip).collect()
}

fn history_entry(value: &Value) -> Option<Message> {
    let entry = value.as_object()?;
    let role = entry.get("role")?.as_str().and_then(Role::conversational)?;
    let content = entry.get("content")?.as_str()?;
    Some(Message::new(role, content))
}
