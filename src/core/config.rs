//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.
//! Configuration is read before the loader runs and handed down by
//! reference; there are no module-level globals.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Catalog storage configuration.
    pub storage: StorageConfig,

    /// Operations domain configuration.
    pub operations: OperationsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the catalog storage backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the flat JSON document holding the item collection.
    /// A missing document reads as an empty collection.
    pub data_path: PathBuf,
}

/// Configuration for the operations domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationsConfig {
    /// Directory scanned for custom operation manifests at startup.
    /// Absence of the directory is not an error; `None` disables the scan.
    pub custom_dir: Option<PathBuf>,

    /// Per-dispatch timeout in seconds. `None` lets handlers run unbounded.
    pub timeout_secs: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "catalog-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            storage: StorageConfig {
                data_path: PathBuf::from("data/items.json"),
            },
            operations: OperationsConfig {
                custom_dir: Some(PathBuf::from("custom_operations")),
                timeout_secs: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_DATA_PATH`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // MCP_DEBUG is a shorthand that wins over MCP_LOG_LEVEL.
        if let Ok(debug) = std::env::var("MCP_DEBUG") {
            if debug != "0" && debug.to_lowercase() != "false" {
                config.logging.level = "debug".to_string();
            }
        }

        if let Ok(data_path) = std::env::var("MCP_DATA_PATH") {
            config.storage.data_path = PathBuf::from(data_path);
            info!("Catalog document set to {:?}", config.storage.data_path);
        }

        if let Ok(custom_dir) = std::env::var("MCP_CUSTOM_OPERATIONS_DIR") {
            config.operations.custom_dir = if custom_dir.is_empty() {
                None
            } else {
                Some(PathBuf::from(custom_dir))
            };
        }

        if let Ok(timeout) = std::env::var("MCP_OPERATION_TIMEOUT_SECS") {
            config.operations.timeout_secs = timeout.parse().ok();
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}
