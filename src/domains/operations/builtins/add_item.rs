//! `add_item` built-in operation.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::domains::catalog::Item;
use crate::domains::operations::descriptor::{JsonObject, OperationDescriptor};
use crate::domains::operations::error::OperationError;
use crate::domains::operations::state::ServerState;

/// Parameters for the add item operation.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddItemParams {
    /// Name of the new item.
    pub name: String,

    /// Description of the new item.
    pub description: String,

    /// Optional arbitrary metadata stored alongside the item.
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Appends a new item with a generated id and creation timestamp.
pub struct AddItemOperation;

impl AddItemOperation {
    /// Operation name as advertised to clients.
    pub const NAME: &'static str = "add_item";

    /// Operation description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Add an item to the catalog. The id and creation timestamp are generated.";

    /// Execute the operation logic.
    #[instrument(skip_all, fields(name = %params.name))]
    pub fn execute(params: &AddItemParams, state: &ServerState) -> Result<Value, OperationError> {
        let item = state.store().add(Item::new(
            params.name.clone(),
            params.description.clone(),
            params.metadata.clone(),
        ))?;

        info!("Added item '{}' ({})", item.name, item.id);
        let message = format!("Item '{}' added", item.name);
        Ok(json!({
            "success": true,
            "item": item,
            "message": message,
        }))
    }

    /// Create the registrable descriptor for this operation.
    pub fn descriptor(state: Arc<ServerState>) -> OperationDescriptor {
        OperationDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<AddItemParams>(),
            move |args: JsonObject| {
                let state = Arc::clone(&state);
                async move {
                    let params: AddItemParams = serde_json::from_value(Value::Object(args))
                        .map_err(|e| OperationError::invalid_arguments(e.to_string()))?;
                    Self::execute(&params, &state)
                }
                .boxed()
            },
        )
    }
}
