//! Optional TOML configuration
//!
//! Read from `<config root>/bpmirror/config.toml`; every field has a
//! default, and a missing file is simply the default configuration.

use anyhow::{Context, Result};
use bp_sync::SignStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Visual style of breakpoint signs
    pub signs: SignStyle,
    /// Interpreter version the debugger runs under, e.g. "3.11"; when set,
    /// the matching version store file is kept linked to the canonical one
    pub python_version: Option<String>,
    /// Override of the breakpoint store directory
    pub store_dir: Option<PathBuf>,
}

impl Config {
    /// Load the config file from the XDG config directory, if present
    pub fn load() -> Result<Self> {
        match config_file() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

fn config_file() -> Option<PathBuf> {
    let root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(dirs::config_dir)?;
    Some(root.join("bpmirror").join("config.toml"))
}
