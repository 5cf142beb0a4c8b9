//! Operation-specific error types.

use thiserror::Error;

use crate::domains::catalog::StoreError;

/// Errors that can occur during operation registration and dispatch.
#[derive(Debug, Error)]
pub enum OperationError {
    /// A descriptor failed validation at registration time.
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// The requested operation, or a record inside one, was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The argument payload could not be deserialized by the handler.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The handler failed; the original message is preserved.
    #[error("Operation '{operation}' failed: {message}")]
    ExecutionFailed { operation: String, message: String },

    /// The handler exceeded the configured dispatch timeout.
    #[error("Operation '{operation}' timed out after {seconds}s")]
    Timeout { operation: String, seconds: u64 },

    /// A catalog store failure inside a built-in handler.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OperationError {
    /// Create a new "invalid descriptor" error.
    pub fn invalid_descriptor(msg: impl Into<String>) -> Self {
        Self::InvalidDescriptor(msg.into())
    }

    /// Create a new "not found" error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
