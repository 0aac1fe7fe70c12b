//! Store-file layout and config-directory discovery
//!
//! The debugger backend persists breakpoints under its XDG config directory
//! as `saved-breakpoints`, with one `saved-breakpoints-<version>` sibling per
//! interpreter version it has been run by.

use bp_core::Result;
use std::path::{Path, PathBuf};

/// File name of the canonical breakpoint store
pub const CANONICAL_NAME: &str = "saved-breakpoints";

/// Prefix of per-version sibling files, e.g. `saved-breakpoints-3.11`
pub const VERSION_PREFIX: &str = "saved-breakpoints-";

/// Subdirectory of the config root holding the store files
const CONFIG_SUBDIR: &str = "pudb";

/// Locations of the canonical store file and its version-specific siblings
#[derive(Debug, Clone)]
pub struct StorePaths {
    config_dir: PathBuf,
}

impl StorePaths {
    /// Resolve the store directory from the environment
    ///
    /// Honors `XDG_CONFIG_HOME`, then the platform config directory, then
    /// the first entry of `XDG_CONFIG_DIRS` (defaulting to `/etc/xdg`).
    pub fn discover() -> Self {
        let config_root = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(dirs::config_dir)
            .unwrap_or_else(|| {
                let dirs = std::env::var("XDG_CONFIG_DIRS")
                    .unwrap_or_else(|_| "/etc/xdg".to_string());
                PathBuf::from(dirs.split(':').next().unwrap_or("/etc/xdg"))
            });
        Self {
            config_dir: config_root.join(CONFIG_SUBDIR),
        }
    }

    /// Use an explicit store directory (tests, `--store-dir`)
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the canonical store file
    pub fn canonical_file(&self) -> PathBuf {
        self.config_dir.join(CANONICAL_NAME)
    }

    /// Path of the store file for one interpreter version
    pub fn version_file(&self, version: &str) -> PathBuf {
        self.config_dir.join(format!("{VERSION_PREFIX}{version}"))
    }

    /// List existing version-specific sibling files, sorted, deduplicated
    ///
    /// The canonical file itself is excluded by the prefix match. A missing
    /// config directory yields an empty list.
    pub fn sibling_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.config_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut siblings = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            if name.to_string_lossy().starts_with(VERSION_PREFIX) {
                siblings.push(entry.path());
            }
        }
        siblings.sort();
        siblings.dedup();
        Ok(siblings)
    }

    /// Create the store directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        Ok(())
    }
}
