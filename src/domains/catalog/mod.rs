//! Catalog domain module.
//!
//! The catalog is the flat item collection the built-in operations work on:
//! a single JSON document of `{id, name, description, metadata, createdAt}`
//! records.

mod error;
mod item;
mod store;

pub use error::StoreError;
pub use item::{Item, ItemCollection};
pub use store::{ItemStore, StoreResult};
