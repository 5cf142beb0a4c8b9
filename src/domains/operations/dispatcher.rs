//! Operation dispatcher - resolution, invocation, failure normalization.
//!
//! The dispatcher is the single boundary between the transport and the
//! handlers: it resolves a request name against the registry, invokes the
//! handler with the payload exactly as received, and folds every outcome
//! into either a payload or a structured failure. A handler failure never
//! escapes as a process-level fault.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::descriptor::JsonObject;
use super::error::OperationError;
use super::registry::OperationRegistry;

/// Resolves operation names and normalizes handler outcomes.
///
/// Holds the registry read-only; construct it only after the loader has
/// finished populating the registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<OperationRegistry>,
    timeout: Option<Duration>,
}

impl Dispatcher {
    /// Create a dispatcher over a fully-loaded registry.
    pub fn new(registry: Arc<OperationRegistry>) -> Self {
        Self {
            registry,
            timeout: None,
        }
    }

    /// Bound every dispatch with a wall-clock timeout. `None` disables the
    /// bound, letting a handler run indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The registry this dispatcher serves.
    pub fn registry(&self) -> &Arc<OperationRegistry> {
        &self.registry
    }

    /// Execute the named operation with the payload exactly as received.
    ///
    /// No schema enforcement and no argument defaulting happen here; the
    /// handler owns both.
    pub async fn execute(&self, name: &str, args: JsonObject) -> Result<Value, OperationError> {
        let descriptor = self.registry.lookup(name).ok_or_else(|| {
            warn!("Unknown operation requested: {}", name);
            OperationError::not_found(format!("operation '{name}'"))
        })?;

        debug!("Dispatching operation '{}'", name);
        let invocation = descriptor.invoke(args);

        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, invocation).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!("Operation '{}' timed out after {:?}", name, limit);
                    return Err(OperationError::Timeout {
                        operation: name.to_string(),
                        seconds: limit.as_secs(),
                    });
                }
            },
            None => invocation.await,
        };

        outcome.map_err(|e| normalize(name, e))
    }
}

/// Fold a handler failure into the dispatch contract: the distinct
/// recoverable kinds pass through untouched, everything else becomes
/// `ExecutionFailed` carrying the operation name and the original message.
fn normalize(operation: &str, error: OperationError) -> OperationError {
    match error {
        e @ (OperationError::NotFound(_) | OperationError::InvalidArguments(_)) => e,
        other => {
            warn!("Operation '{}' failed: {}", operation, other);
            OperationError::execution_failed(operation, other.to_string())
        }
    }
}
