//! Item data model for the catalog.
//!
//! Items are flat records with a generated id and creation timestamp. The
//! wire format uses camelCase for `createdAt` to match the document layout
//! clients already depend on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Generated unique identifier (UUID v4).
    pub id: String,

    /// Item name.
    pub name: String,

    /// Item description.
    pub description: String,

    /// Arbitrary caller-supplied metadata.
    #[serde(default = "default_metadata")]
    pub metadata: serde_json::Value,

    /// Creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

fn default_metadata() -> serde_json::Value {
    serde_json::json!({})
}

impl Item {
    /// Create a new item with a fresh id and the current timestamp.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            metadata: metadata.unwrap_or_else(default_metadata),
            created_at: Utc::now(),
        }
    }

    /// Render a named field as searchable text.
    ///
    /// Returns `None` for fields this item does not expose.
    pub fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "description" => Some(self.description.clone()),
            "metadata" => Some(self.metadata.to_string()),
            _ => None,
        }
    }
}

/// The flat document backing the catalog: `{"items": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCollection {
    /// All items, in insertion order.
    #[serde(default)]
    pub items: Vec<Item>,
}
