//! Operation descriptors - the unit of registration and dispatch.
//!
//! A descriptor pairs an operation's identity (name, description, argument
//! contract) with its executable handler. The argument contract is an opaque
//! JSON Schema surfaced verbatim to clients; nothing here validates call
//! arguments against it.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use super::error::OperationError;

/// JSON object map used for argument payloads and schemas.
pub type JsonObject = serde_json::Map<String, Value>;

/// Boxed future returned by operation handlers.
pub type HandlerFuture = BoxFuture<'static, Result<Value, OperationError>>;

/// Shared handler function: raw argument object in, serializable value out.
pub type HandlerFn = Arc<dyn Fn(JsonObject) -> HandlerFuture + Send + Sync>;

/// Trait for implementing operations as dedicated types.
///
/// This is the compile-time extension point: implement it, convert with
/// [`OperationDescriptor::from_handler`], and register the result like any
/// other operation.
#[async_trait::async_trait]
pub trait OperationHandler: Send + Sync {
    /// Stable operation name advertised to clients.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Declared argument shape.
    fn input_schema(&self) -> Arc<JsonObject>;

    /// Execute the operation with the raw argument payload.
    async fn execute(&self, args: JsonObject) -> Result<Value, OperationError>;
}

/// An immutable, registrable operation.
///
/// Created by the loader (built-ins and custom manifests) or by embedders;
/// owned by the registry from registration onward and never mutated after.
#[derive(Clone)]
pub struct OperationDescriptor {
    name: String,
    description: String,
    input_schema: Arc<JsonObject>,
    handler: HandlerFn,
}

impl OperationDescriptor {
    /// Create a descriptor from its parts.
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: impl Into<Arc<JsonObject>>,
        handler: F,
    ) -> Self
    where
        F: Fn(JsonObject) -> HandlerFuture + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: input_schema.into(),
            handler: Arc::new(handler),
        }
    }

    /// Create a descriptor from a typed [`OperationHandler`] implementation.
    pub fn from_handler<H: OperationHandler + 'static>(handler: H) -> Self {
        let name = handler.name().to_string();
        let description = handler.description().to_string();
        let input_schema = handler.input_schema();
        let handler = Arc::new(handler);
        Self {
            name,
            description,
            input_schema,
            handler: Arc::new(move |args| {
                let handler = Arc::clone(&handler);
                async move { handler.execute(args).await }.boxed()
            }),
        }
    }

    /// Operation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operation description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared argument contract.
    pub fn input_schema(&self) -> Arc<JsonObject> {
        Arc::clone(&self.input_schema)
    }

    /// Invoke the handler with the payload exactly as received.
    pub fn invoke(&self, args: JsonObject) -> HandlerFuture {
        (self.handler)(args)
    }

    /// Handler-free snapshot for advertisement to clients.
    pub fn info(&self) -> OperationInfo {
        OperationInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: Arc::clone(&self.input_schema),
        }
    }
}

impl fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Snapshot of a registered operation without its handler.
#[derive(Debug, Clone)]
pub struct OperationInfo {
    /// Operation name.
    pub name: String,

    /// Operation description.
    pub description: String,

    /// Declared argument contract.
    pub input_schema: Arc<JsonObject>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoOperation;

    #[async_trait::async_trait]
    impl OperationHandler for EchoOperation {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes its arguments"
        }

        fn input_schema(&self) -> Arc<JsonObject> {
            Arc::new(JsonObject::new())
        }

        async fn execute(&self, args: JsonObject) -> Result<Value, OperationError> {
            Ok(Value::Object(args))
        }
    }

    #[tokio::test]
    async fn test_from_handler_preserves_identity() {
        let descriptor = OperationDescriptor::from_handler(EchoOperation);
        assert_eq!(descriptor.name(), "echo");
        assert_eq!(descriptor.description(), "Echoes its arguments");

        let mut args = JsonObject::new();
        args.insert("key".to_string(), json!("value"));
        let result = descriptor.invoke(args).await.unwrap();
        assert_eq!(result, json!({"key": "value"}));
    }

    #[tokio::test]
    async fn test_closure_descriptor() {
        let descriptor = OperationDescriptor::new(
            "answer",
            "Returns the answer",
            JsonObject::new(),
            |_args| async { Ok(json!(42)) }.boxed(),
        );
        let result = descriptor.invoke(JsonObject::new()).await.unwrap();
        assert_eq!(result, json!(42));
    }

    #[test]
    fn test_info_excludes_handler() {
        let descriptor = OperationDescriptor::from_handler(EchoOperation);
        let info = descriptor.info();
        assert_eq!(info.name, "echo");
        assert_eq!(info.description, "Echoes its arguments");
    }
}
