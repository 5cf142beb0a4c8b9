//! MCP Server Library
//!
//! This crate provides a scaffold for building Model Context Protocol (MCP)
//! tool servers around a pluggable, fail-isolated operation dispatcher.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, the main server, and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **operations**: the operation registry, loader, and dispatcher
//!   - **catalog**: the flat item collection served by the built-in operations
//!
//! At startup the loader registers the built-in operations and scans an
//! optional directory of declarative custom operations; every request is then
//! resolved and executed through the dispatcher, which folds handler
//! failures into structured error values instead of letting them escape.
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
