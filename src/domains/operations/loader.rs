//! Startup loader - brings the registry to its fully-populated state.
//!
//! Runs exactly once before the dispatcher serves any request. Built-ins are
//! registered first; a directory of custom operation manifests is scanned
//! second, alphabetically by filename, with every per-file failure isolated
//! and recorded. Later registrations shadow earlier ones (last wins), so a
//! custom operation may override a built-in.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use super::builtins;
use super::descriptor::OperationDescriptor;
use super::error::OperationError;
use super::manifest::OperationManifest;
use super::registry::OperationRegistry;
use super::state::ServerState;

/// Extension recognized for custom operation files.
const MANIFEST_EXTENSION: &str = "json";

/// One per-file custom operation load failure.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    /// The file that failed to load.
    pub file: PathBuf,

    /// Why it failed.
    pub message: String,
}

/// Outcome of a load pass.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Number of built-in operations registered.
    pub builtins: usize,

    /// Names of successfully registered custom operations.
    pub custom: Vec<String>,

    /// Per-file diagnostics for custom operations that failed to load.
    pub failures: Vec<LoadFailure>,
}

/// Populate the registry: built-ins first, then the custom directory.
///
/// A registry insertion failure for a built-in is fatal to startup; custom
/// operation failures are isolated per file. A missing custom directory is a
/// no-op. The final operation count is published into the shared state.
pub fn load_operations(
    state: &Arc<ServerState>,
    registry: &mut OperationRegistry,
) -> Result<LoadReport, OperationError> {
    let mut report = LoadReport::default();

    for descriptor in builtins::all(state) {
        registry.register(descriptor)?;
        report.builtins += 1;
    }
    info!("Registered {} built-in operations", report.builtins);

    if let Some(dir) = state.config().operations.custom_dir.clone() {
        load_custom_dir(&dir, registry, &mut report);
    }

    state.set_operation_count(registry.len());
    Ok(report)
}

/// Scan a directory of manifests, isolating every per-file failure.
fn load_custom_dir(dir: &Path, registry: &mut OperationRegistry, report: &mut LoadReport) {
    if !dir.is_dir() {
        info!("Custom operations directory {:?} not present, skipping", dir);
        return;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read custom operations directory {:?}: {}", dir, e);
            report.failures.push(LoadFailure {
                file: dir.to_path_buf(),
                message: e.to_string(),
            });
            return;
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == MANIFEST_EXTENSION)
        })
        .collect();
    files.sort();

    for file in files {
        match load_manifest_file(&file) {
            Ok(descriptor) => {
                let name = descriptor.name().to_string();
                match registry.register(descriptor) {
                    Ok(()) => {
                        info!("Loaded custom operation '{}' from {:?}", name, file);
                        report.custom.push(name);
                    }
                    Err(e) => record_failure(report, file, e),
                }
            }
            Err(e) => record_failure(report, file, e),
        }
    }
}

fn load_manifest_file(file: &Path) -> Result<OperationDescriptor, OperationError> {
    let contents = fs::read_to_string(file)
        .map_err(|e| OperationError::invalid_descriptor(format!("unreadable file: {e}")))?;
    Ok(OperationManifest::parse(&contents)?.into_descriptor())
}

fn record_failure(report: &mut LoadReport, file: PathBuf, error: OperationError) {
    warn!("Skipping custom operation {:?}: {}", file, error);
    report.failures.push(LoadFailure {
        file,
        message: error.to_string(),
    });
}
