//! Catalog store error types.

use thiserror::Error;

/// Errors that can occur while reading or writing the item catalog.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing document could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document contained invalid JSON.
    #[error("Invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),

    /// No item with the given id exists.
    #[error("No item with id '{0}'")]
    ItemNotFound(String),
}

impl StoreError {
    /// Create a new "item not found" error.
    pub fn item_not_found(id: impl Into<String>) -> Self {
        Self::ItemNotFound(id.into())
    }
}
