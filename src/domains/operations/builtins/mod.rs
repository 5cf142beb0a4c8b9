//! Built-in operation definitions.
//!
//! One file per operation. Each defines its parameter struct, an `execute`
//! with the core logic, and a `descriptor` constructor the loader registers.

mod add_item;
mod get_status;
mod list_items;
mod remove_item;
mod search_items;

pub use add_item::{AddItemOperation, AddItemParams};
pub use get_status::{GetStatusOperation, GetStatusParams};
pub use list_items::{ListItemsOperation, ListItemsParams};
pub use remove_item::{RemoveItemOperation, RemoveItemParams};
pub use search_items::{SearchItemsOperation, SearchItemsParams};

use std::sync::Arc;

use super::descriptor::OperationDescriptor;
use super::state::ServerState;

/// Descriptors for the fixed built-in set, in registration order.
pub fn all(state: &Arc<ServerState>) -> Vec<OperationDescriptor> {
    vec![
        ListItemsOperation::descriptor(Arc::clone(state)),
        AddItemOperation::descriptor(Arc::clone(state)),
        RemoveItemOperation::descriptor(Arc::clone(state)),
        SearchItemsOperation::descriptor(Arc::clone(state)),
        GetStatusOperation::descriptor(Arc::clone(state)),
    ]
}
