//! Atomic load/save of the canonical breakpoint file
//!
//! The store file is shared with the debugger backend process, so it is
//! treated as the durable source of truth: loads re-read it in full, saves
//! re-derive it in full and stage through a temporary file so a failed write
//! never truncates it.

use crate::linkmerge;
use crate::paths::StorePaths;
use bp_core::{codec, Breakpoint, Result, StoreError};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Handle on the canonical store file
pub struct Store {
    paths: StorePaths,
    active_version: Option<String>,
}

impl Store {
    /// Open the store, running the one-time version-file merge
    pub fn open(paths: StorePaths) -> Result<Self> {
        let store = Self {
            paths,
            active_version: None,
        };
        store.merge()?;
        Ok(store)
    }

    /// Open the store for a specific interpreter version
    ///
    /// Ensures a `saved-breakpoints-<version>` link exists so the backend
    /// sees the same breakpoint set when launched under this version.
    pub fn with_version(paths: StorePaths, version: impl Into<String>) -> Result<Self> {
        let store = Self {
            paths,
            active_version: Some(version.into()),
        };
        store.merge()?;
        Ok(store)
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Decode the full breakpoint list from the canonical file
    ///
    /// Runs the link merge first in case the backend left a new version file
    /// behind since the last call. A missing canonical file is an empty set.
    pub fn load(&self) -> Result<Vec<Breakpoint>> {
        self.merge()?;
        let canonical = self.paths.canonical_file();
        let text = match fs::read_to_string(&canonical) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let records = codec::decode(&text)?;
        debug!(count = records.len(), file = %canonical.display(), "loaded store");
        Ok(records)
    }

    /// Encode and atomically write the full breakpoint list
    pub fn save(&self, records: &[Breakpoint]) -> Result<()> {
        self.paths.ensure_dir()?;
        let canonical = self.paths.canonical_file();
        atomic_write(&canonical, codec::encode(records).as_bytes())?;
        self.merge()?;
        debug!(count = records.len(), file = %canonical.display(), "saved store");
        Ok(())
    }

    /// Empty the store (the backend keeps a usable, zero-breakpoint file)
    pub fn clear(&self) -> Result<()> {
        self.save(&[])
    }

    fn merge(&self) -> Result<()> {
        self.paths.ensure_dir()?;
        linkmerge::merge(&self.paths, self.active_version.as_deref())?;
        Ok(())
    }
}

/// Write `data` to a temporary file in the target's directory, then rename
/// it over the target
///
/// A failed write leaves the previous file contents in place. Renaming over
/// the canonical path keeps the version links valid, since they point at the
/// path rather than the inode.
pub fn atomic_write(target: &Path, data: &[u8]) -> Result<()> {
    let dir = target.parent().ok_or(StoreError::EmptyPath)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}
