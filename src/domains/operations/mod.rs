//! Operations domain - the registry and dispatch core.
//!
//! ## Architecture
//!
//! - `descriptor.rs` - the unit of registration: identity, contract, handler
//! - `registry.rs` - in-memory name -> descriptor mapping
//! - `loader.rs` - one-shot startup population (built-ins + custom directory)
//! - `dispatcher.rs` - resolution, invocation, failure normalization
//! - `manifest.rs` - declarative custom operations loaded from `.json` files
//! - `builtins/` - the fixed built-in set (one file per operation)
//! - `router.rs` - bridge into the rmcp ToolRouter
//!
//! ## Adding a built-in operation
//!
//! 1. Create a new file in `builtins/` with params, `execute`, `descriptor`
//! 2. Export it in `builtins/mod.rs` and add it to `builtins::all`
//!
//! Custom operations need no code at all: drop a manifest file into the
//! configured directory.

pub mod builtins;
mod descriptor;
mod dispatcher;
mod error;
mod loader;
mod manifest;
mod registry;
pub mod router;
mod state;

pub use descriptor::{
    HandlerFn, HandlerFuture, JsonObject, OperationDescriptor, OperationHandler, OperationInfo,
};
pub use dispatcher::Dispatcher;
pub use error::OperationError;
pub use loader::{LoadFailure, LoadReport, load_operations};
pub use manifest::OperationManifest;
pub use registry::OperationRegistry;
pub use router::build_operation_router;
pub use state::ServerState;
