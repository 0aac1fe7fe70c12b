//! Shared utilities for CLI commands

use crate::config::Config;
use anyhow::{Context, Result};
use bp_store::{Store, StorePaths};
use bp_sync::BreakpointRegistry;
use std::path::{Path, PathBuf};

/// Open the registry over the configured store directory
///
/// Precedence: `--store-dir` flag, then the config file, then XDG discovery.
pub fn open_registry(store_dir: Option<&Path>, config: &Config) -> Result<BreakpointRegistry> {
    let paths = match store_dir.or(config.store_dir.as_deref()) {
        Some(dir) => StorePaths::with_config_dir(dir),
        None => StorePaths::discover(),
    };

    let store = match &config.python_version {
        Some(version) => Store::with_version(paths, version.clone()),
        None => Store::open(paths),
    }
    .context("failed to open breakpoint store")?;

    BreakpointRegistry::open(store).context("failed to load breakpoint store")
}

/// Breakpoints are keyed by absolute path; anchor relative arguments at cwd
pub fn absolutize(file: &Path) -> Result<PathBuf> {
    if file.is_absolute() {
        return Ok(file.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    Ok(cwd.join(file))
}
