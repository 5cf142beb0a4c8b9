//! `remove_item` built-in operation.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::domains::catalog::StoreError;
use crate::domains::operations::descriptor::{JsonObject, OperationDescriptor};
use crate::domains::operations::error::OperationError;
use crate::domains::operations::state::ServerState;

/// Parameters for the remove item operation.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RemoveItemParams {
    /// Exact id of the item to remove.
    pub id: String,
}

/// Deletes an item by exact id match.
pub struct RemoveItemOperation;

impl RemoveItemOperation {
    /// Operation name as advertised to clients.
    pub const NAME: &'static str = "remove_item";

    /// Operation description shown to clients.
    pub const DESCRIPTION: &'static str = "Remove an item from the catalog by its exact id.";

    /// Execute the operation logic.
    #[instrument(skip_all, fields(id = %params.id))]
    pub fn execute(
        params: &RemoveItemParams,
        state: &ServerState,
    ) -> Result<Value, OperationError> {
        let removed = state.store().remove(&params.id).map_err(|e| match e {
            StoreError::ItemNotFound(_) => OperationError::not_found(e.to_string()),
            other => other.into(),
        })?;

        info!("Removed item '{}' ({})", removed.name, removed.id);
        let message = format!("Item '{}' removed", removed.name);
        Ok(json!({
            "success": true,
            "item": removed,
            "message": message,
        }))
    }

    /// Create the registrable descriptor for this operation.
    pub fn descriptor(state: Arc<ServerState>) -> OperationDescriptor {
        OperationDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<RemoveItemParams>(),
            move |args: JsonObject| {
                let state = Arc::clone(&state);
                async move {
                    let params: RemoveItemParams = serde_json::from_value(Value::Object(args))
                        .map_err(|e| OperationError::invalid_arguments(e.to_string()))?;
                    Self::execute(&params, &state)
                }
                .boxed()
            },
        )
    }
}
