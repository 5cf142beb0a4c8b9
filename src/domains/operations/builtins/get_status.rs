//! `get_status` built-in operation.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::domains::operations::descriptor::{JsonObject, OperationDescriptor};
use crate::domains::operations::error::OperationError;
use crate::domains::operations::state::ServerState;

/// Parameters for the status operation. Takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetStatusParams {}

/// Reports server identity, uptime, catalog size, and configuration echo.
pub struct GetStatusOperation;

impl GetStatusOperation {
    /// Operation name as advertised to clients.
    pub const NAME: &'static str = "get_status";

    /// Operation description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Report server identity, uptime, item count, registered operation count, and selected configuration.";

    /// Execute the operation logic.
    #[instrument(skip_all)]
    pub fn execute(
        _params: &GetStatusParams,
        state: &ServerState,
    ) -> Result<Value, OperationError> {
        let config = state.config();
        let item_count = state.store().count()?;

        Ok(json!({
            "server": {
                "name": &config.server.name,
                "version": &config.server.version,
            },
            "uptimeSeconds": state.uptime_seconds(),
            "itemCount": item_count,
            "operationCount": state.operation_count(),
            "config": {
                "dataPath": &config.storage.data_path,
                "customOperationsDir": &config.operations.custom_dir,
                "logLevel": &config.logging.level,
                "timeoutSecs": config.operations.timeout_secs,
            },
        }))
    }

    /// Create the registrable descriptor for this operation.
    pub fn descriptor(state: Arc<ServerState>) -> OperationDescriptor {
        OperationDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<GetStatusParams>(),
            move |args: JsonObject| {
                let state = Arc::clone(&state);
                async move {
                    let params: GetStatusParams = serde_json::from_value(Value::Object(args))
                        .map_err(|e| OperationError::invalid_arguments(e.to_string()))?;
                    Self::execute(&params, &state)
                }
                .boxed()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::domains::catalog::Item;
    use tempfile::TempDir;

    fn test_state() -> (TempDir, Arc<ServerState>) {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_path = dir.path().join("items.json");
        (dir, Arc::new(ServerState::new(Arc::new(config))))
    }

    #[test]
    fn test_status_reports_identity_and_counts() {
        let (_dir, state) = test_state();
        state
            .store()
            .add(Item::new("Widget", "A widget", None))
            .unwrap();
        state.set_operation_count(5);

        let value = GetStatusOperation::execute(&GetStatusParams::default(), &state).unwrap();
        assert_eq!(value["server"]["name"], json!(state.config().server.name));
        assert_eq!(value["itemCount"], json!(1));
        assert_eq!(value["operationCount"], json!(5));
        assert!(value["uptimeSeconds"].is_u64());
        assert!(value["config"]["dataPath"].is_string());
    }

    #[tokio::test]
    async fn test_descriptor_ignores_extra_arguments() {
        let (_dir, state) = test_state();
        let descriptor = GetStatusOperation::descriptor(state);

        let mut args = JsonObject::new();
        args.insert("unexpected".to_string(), json!(true));
        let value = descriptor.invoke(args).await.unwrap();
        assert!(value["server"]["name"].is_string());
    }
}
