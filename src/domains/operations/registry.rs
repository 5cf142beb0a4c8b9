//! Operation Registry - the catalog of invocable operations.
//!
//! The registry maps operation names to descriptors. It is populated once by
//! the loader at startup and read-only afterwards; the server publishes it
//! behind an `Arc` before the dispatcher serves any request.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::descriptor::{OperationDescriptor, OperationInfo};
use super::error::OperationError;

/// In-memory mapping from operation name to descriptor.
///
/// Every entry reachable by enumeration is also reachable by exact-name
/// lookup and vice versa. Enumeration order carries no meaning and is not
/// stable across registrations.
#[derive(Debug, Default)]
pub struct OperationRegistry {
    operations: HashMap<String, OperationDescriptor>,
}

impl OperationRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry keyed by the descriptor's name.
    ///
    /// Registering a name that already exists replaces the previous entry
    /// (last-registered-wins); the replacement is logged so shadowing stays
    /// visible in the diagnostic stream.
    pub fn register(&mut self, descriptor: OperationDescriptor) -> Result<(), OperationError> {
        if descriptor.name().trim().is_empty() {
            return Err(OperationError::invalid_descriptor(
                "operation name must not be empty",
            ));
        }

        let name = descriptor.name().to_string();
        if self.operations.insert(name.clone(), descriptor).is_some() {
            warn!("Operation '{}' re-registered, previous entry replaced", name);
        } else {
            debug!("Registered operation '{}'", name);
        }
        Ok(())
    }

    /// Look up a descriptor by exact name.
    pub fn lookup(&self, name: &str) -> Option<&OperationDescriptor> {
        self.operations.get(name)
    }

    /// Handler-free snapshots of every registered operation.
    pub fn list(&self) -> Vec<OperationInfo> {
        self.operations.values().map(|d| d.info()).collect()
    }

    /// Whether an operation is registered under the given name.
    pub fn exists(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the registry holds no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
