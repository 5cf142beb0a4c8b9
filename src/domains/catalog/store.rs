//! Flat-document item store.
//!
//! The catalog lives in a single JSON document that is rewritten wholesale on
//! every mutation. A missing document reads as an empty collection. Each call
//! is an independent read-modify-write with no cross-call transaction, which
//! is sound only while at most one request is in flight at a time.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::StoreError;
use super::item::{Item, ItemCollection};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// File-backed item store.
pub struct ItemStore {
    path: PathBuf,
}

impl ItemStore {
    /// Create a store over the given document path.
    ///
    /// The document is not touched until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole collection. A missing document is an empty collection.
    pub fn load(&self) -> StoreResult<ItemCollection> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Catalog document {:?} not found, starting empty", self.path);
                Ok(ItemCollection::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the document with the given collection.
    pub fn save(&self, collection: &ItemCollection) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(collection)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Append an item and persist the collection.
    pub fn add(&self, item: Item) -> StoreResult<Item> {
        let mut collection = self.load()?;
        collection.items.push(item.clone());
        self.save(&collection)?;
        info!("Added item '{}' ({})", item.name, item.id);
        Ok(item)
    }

    /// Remove the item with the given id and persist the collection.
    pub fn remove(&self, id: &str) -> StoreResult<Item> {
        let mut collection = self.load()?;
        let position = collection
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::item_not_found(id))?;
        let removed = collection.items.remove(position);
        self.save(&collection)?;
        info!("Removed item '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Number of items currently stored.
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.load()?.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, ItemStore) {
        let dir = TempDir::new().unwrap();
        let store = ItemStore::new(dir.path().join("items.json"));
        (dir, store)
    }

    #[test]
    fn test_load_missing_document_is_empty() {
        let (_dir, store) = test_store();
        let collection = store.load().unwrap();
        assert!(collection.items.is_empty());
    }

    #[test]
    fn test_add_then_load() {
        let (_dir, store) = test_store();
        let item = store.add(Item::new("Widget", "A widget", None)).unwrap();

        let collection = store.load().unwrap();
        assert_eq!(collection.items.len(), 1);
        assert_eq!(collection.items[0].id, item.id);
        assert_eq!(collection.items[0].name, "Widget");
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = ItemStore::new(dir.path().join("nested/deeper/items.json"));
        store.save(&ItemCollection::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_remove_existing() {
        let (_dir, store) = test_store();
        let kept = store.add(Item::new("Keep", "stays", None)).unwrap();
        let gone = store.add(Item::new("Gone", "goes", None)).unwrap();

        let removed = store.remove(&gone.id).unwrap();
        assert_eq!(removed.id, gone.id);

        let collection = store.load().unwrap();
        assert_eq!(collection.items.len(), 1);
        assert_eq!(collection.items[0].id, kept.id);
    }

    #[test]
    fn test_remove_missing_leaves_collection_unchanged() {
        let (_dir, store) = test_store();
        store.add(Item::new("Widget", "A widget", None)).unwrap();

        let result = store.remove("no-such-id");
        assert!(matches!(result, Err(StoreError::ItemNotFound(_))));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_count() {
        let (_dir, store) = test_store();
        assert_eq!(store.count().unwrap(), 0);
        store.add(Item::new("A", "first", None)).unwrap();
        store.add(Item::new("B", "second", None)).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let (_dir, store) = test_store();
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }
}
