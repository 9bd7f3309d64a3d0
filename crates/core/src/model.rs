//! Todo entity and the transient request shapes.
//!
//! Pure data definitions: field constraints live in the store schema, not
//! here. The length ceilings are exported so callers can reference them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Maximum title length accepted by the store schema.
pub const TITLE_MAX_LEN: usize = 200;

/// Maximum description length accepted by the store schema.
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Store-assigned identifier, stable for the lifetime of the row.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// Set once at creation, never modified afterwards.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutating operation.
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create a todo. Not persisted as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Partial update: only fields that are present are applied, absent fields
/// keep their prior value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_description_to_empty() {
        let input: TodoCreate = serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.description, "");
    }

    #[test]
    fn update_treats_absent_fields_as_unset() {
        let input: TodoUpdate = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.description.is_none());
        assert_eq!(input.completed, Some(true));
    }
}
