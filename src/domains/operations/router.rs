//! Operation Router - bridges the registry into the rmcp ToolRouter.
//!
//! Every registered operation becomes one rmcp tool route whose handler goes
//! through the dispatcher, so transport-side calls get the same resolution
//! and failure normalization as direct `Dispatcher::execute` calls.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};
use rmcp::model::{CallToolResult, Content, Tool};

use super::descriptor::OperationInfo;
use super::dispatcher::Dispatcher;

/// Build the tool router with one route per registered operation.
pub fn build_operation_router<S>(dispatcher: Arc<Dispatcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();
    for info in dispatcher.registry().list() {
        router = router.with_route(create_route(info, Arc::clone(&dispatcher)));
    }
    router
}

/// Create the rmcp route for a single operation.
fn create_route<S>(info: OperationInfo, dispatcher: Arc<Dispatcher>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let tool = Tool {
        name: info.name.clone().into(),
        description: Some(info.description.into()),
        input_schema: info.input_schema,
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    };

    let name = info.name;
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let dispatcher = Arc::clone(&dispatcher);
        let name = name.clone();
        async move {
            match dispatcher.execute(&name, args).await {
                Ok(value) => {
                    let rendered = serde_json::to_string_pretty(&value)
                        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                    Ok(CallToolResult::success(vec![Content::text(rendered)]))
                }
                Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
            }
        }
        .boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::domains::operations::loader::load_operations;
    use crate::domains::operations::registry::OperationRegistry;
    use crate::domains::operations::state::ServerState;
    use tempfile::TempDir;

    struct TestServer {}

    fn test_dispatcher() -> (TempDir, Arc<Dispatcher>) {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_path = dir.path().join("items.json");
        config.operations.custom_dir = None;
        let state = Arc::new(ServerState::new(Arc::new(config)));

        let mut registry = OperationRegistry::new();
        load_operations(&state, &mut registry).unwrap();
        (dir, Arc::new(Dispatcher::new(Arc::new(registry))))
    }

    #[test]
    fn test_router_advertises_every_operation() {
        let (_dir, dispatcher) = test_dispatcher();
        let router: ToolRouter<TestServer> = build_operation_router(Arc::clone(&dispatcher));

        let tools = router.list_all();
        assert_eq!(tools.len(), dispatcher.registry().len());

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"list_items"));
        assert!(names.contains(&"add_item"));
        assert!(names.contains(&"remove_item"));
        assert!(names.contains(&"search_items"));
        assert!(names.contains(&"get_status"));
    }
}
