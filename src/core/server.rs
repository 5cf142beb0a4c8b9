//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the operation dispatcher.
//!
//! ## Initialization order
//!
//! Construction is explicit, with no globals: configuration is read first,
//! the loader populates the registry, the registry is published behind `Arc`,
//! and only then are the dispatcher and the rmcp router over it built. The
//! dispatcher is never reachable before the loader has completed.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::config::Config;
use crate::domains::operations::{
    Dispatcher, JsonObject, OperationError, OperationInfo, OperationRegistry, ServerState,
    build_operation_router, load_operations,
};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and serves the
/// registered operations as MCP tools.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatcher over the loaded operation registry.
    dispatcher: Arc<Dispatcher>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Runs the one-time operation load pass; custom-operation failures are
    /// logged and reported but never abort startup.
    pub fn new(config: Config) -> super::error::Result<Self> {
        let config = Arc::new(config);
        let state = Arc::new(ServerState::new(Arc::clone(&config)));

        let mut registry = OperationRegistry::new();
        let report = load_operations(&state, &mut registry)?;
        info!(
            "Operations loaded: {} built-in, {} custom, {} skipped",
            report.builtins,
            report.custom.len(),
            report.failures.len()
        );

        let registry = Arc::new(registry);
        let timeout = config.operations.timeout_secs.map(Duration::from_secs);
        let dispatcher = Arc::new(Dispatcher::new(registry).with_timeout(timeout));

        Ok(Self {
            tool_router: build_operation_router::<Self>(Arc::clone(&dispatcher)),
            config,
            dispatcher,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Execute an operation directly, bypassing the transport.
    ///
    /// Useful for embedding and tests; follows the exact dispatch contract
    /// of the transport path.
    pub async fn execute(
        &self,
        name: &str,
        args: JsonObject,
    ) -> std::result::Result<serde_json::Value, OperationError> {
        self.dispatcher.execute(name, args).await
    }

    /// Handler-free snapshots of every advertised operation.
    pub fn list_operations(&self) -> Vec<OperationInfo> {
        self.dispatcher.registry().list()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "This server manages a flat item catalog. It provides built-in catalog \
                 operations and any custom operations loaded at startup."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_server() -> (TempDir, McpServer) {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_path = dir.path().join("items.json");
        config.operations.custom_dir = Some(dir.path().join("custom_operations"));
        (dir, McpServer::new(config).unwrap())
    }

    #[test]
    fn test_server_advertises_builtins() {
        let (_dir, server) = test_server();
        let operations = server.list_operations();
        assert_eq!(operations.len(), 5);
    }

    #[tokio::test]
    async fn test_add_then_list_round_trip() {
        let (_dir, server) = test_server();

        let mut args = JsonObject::new();
        args.insert("name".to_string(), json!("A"));
        args.insert("description".to_string(), json!("d"));
        let added = server.execute("add_item", args).await.unwrap();
        assert_eq!(added["success"], json!(true));

        let listed = server.execute("list_items", JsonObject::new()).await.unwrap();
        assert_eq!(listed["count"], json!(1));
        assert_eq!(listed["items"][0]["name"], json!("A"));
    }

    #[tokio::test]
    async fn test_status_sees_operation_count() {
        let (_dir, server) = test_server();
        let status = server.execute("get_status", JsonObject::new()).await.unwrap();
        assert_eq!(status["operationCount"], json!(5));
        assert_eq!(status["itemCount"], json!(0));
    }

    #[tokio::test]
    async fn test_unknown_operation_is_reported_not_thrown() {
        let (_dir, server) = test_server();
        let error = server
            .execute("definitely_missing", JsonObject::new())
            .await
            .unwrap_err();
        assert!(matches!(error, OperationError::NotFound(_)));
    }

    #[test]
    fn test_custom_operations_loaded_at_startup() {
        let dir = TempDir::new().unwrap();
        let custom = dir.path().join("custom_operations");
        std::fs::create_dir_all(&custom).unwrap();
        std::fs::write(
            custom.join("greet.json"),
            r#"{"name": "greet", "result": "hello"}"#,
        )
        .unwrap();

        let mut config = Config::default();
        config.storage.data_path = dir.path().join("items.json");
        config.operations.custom_dir = Some(custom);

        let server = McpServer::new(config).unwrap();
        assert_eq!(server.list_operations().len(), 6);
    }
}
