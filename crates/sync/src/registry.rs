//! Authoritative per-buffer breakpoint registry
//!
//! The registry owns the in-memory placed sets and condition table for the
//! lifetime of an editing session; the store file remains the durable source
//! of truth. Memory is a cache: every mutation marks the table dirty and
//! callers flush with [`BreakpointRegistry::save`] before handing control
//! back to anything that might start the debugger.

use bp_core::{Breakpoint, ConditionTable, Result, StoreError};
use bp_store::Store;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-file bookkeeping: placed lines and sign visibility
#[derive(Debug, Default, Clone)]
pub struct BufferState {
    /// Lines with breakpoints, ascending, deduplicated
    placed: BTreeSet<u32>,
    /// Whether signs for this file are currently rendered
    visible: bool,
}

impl BufferState {
    pub fn visible(&self) -> bool {
        self.visible
    }
}

/// The authoritative mapping of placed breakpoints per file
pub struct BreakpointRegistry {
    store: Store,
    buffers: BTreeMap<PathBuf, BufferState>,
    conditions: ConditionTable,
    dirty: bool,
}

impl BreakpointRegistry {
    /// Build a registry over the store and load its current contents
    pub fn open(store: Store) -> Result<Self> {
        let mut registry = Self {
            store,
            buffers: BTreeMap::new(),
            conditions: ConditionTable::new(),
            dirty: false,
        };
        registry.load()?;
        Ok(registry)
    }

    /// Discard the in-memory table and rebuild it from the store
    ///
    /// Populates state for every file the store mentions, not just the one
    /// currently being edited. Visibility flags of already-known files
    /// survive the reload. On a decode error the previous table is retained
    /// untouched.
    pub fn load(&mut self) -> Result<()> {
        let records = self.store.load()?;

        let mut buffers: BTreeMap<PathBuf, BufferState> = BTreeMap::new();
        let mut conditions = ConditionTable::new();
        for bp in records {
            buffers
                .entry(bp.file.clone())
                .or_default()
                .placed
                .insert(bp.line);
            if let Some(cond) = bp.condition {
                conditions.set(&bp.file, bp.line, cond);
            }
        }
        for (file, state) in &self.buffers {
            if state.visible {
                buffers.entry(file.clone()).or_default().visible = true;
            }
        }

        self.buffers = buffers;
        self.conditions = conditions;
        self.dirty = false;
        debug!(files = self.buffers.len(), "registry loaded");
        Ok(())
    }

    /// Flush the full table to the store
    ///
    /// On failure the registry stays dirty so the caller can retry.
    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.all_breakpoints())?;
        self.dirty = false;
        Ok(())
    }

    /// True when in-memory state has diverged from the store file
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Place a breakpoint; no-op if one is already present at that line
    pub fn place(&mut self, file: &Path, line: u32, condition: Option<&str>) -> Result<Breakpoint> {
        validate(file, line)?;
        let state = self.buffers.entry(file.to_path_buf()).or_default();
        if state.placed.insert(line) {
            if let Some(cond) = condition {
                self.conditions.set(file, line, cond);
            }
            self.dirty = true;
            debug!(file = %file.display(), line, "breakpoint placed");
        }
        let bp = Breakpoint {
            file: file.to_path_buf(),
            line,
            condition: self.conditions.get(file, line).map(str::to_string),
        };
        Ok(bp)
    }

    /// Remove a breakpoint; no-op if absent
    pub fn remove(&mut self, file: &Path, line: u32) -> Result<()> {
        validate(file, line)?;
        if let Some(state) = self.buffers.get_mut(file) {
            if state.placed.remove(&line) {
                self.conditions.remove(file, line);
                self.dirty = true;
                debug!(file = %file.display(), line, "breakpoint removed");
            }
        }
        Ok(())
    }

    /// Remove if present, place otherwise; returns true when now placed
    pub fn toggle(&mut self, file: &Path, line: u32) -> Result<bool> {
        validate(file, line)?;
        if self.has_breakpoint(file, line) {
            self.remove(file, line)?;
            Ok(false)
        } else {
            self.place(file, line, None)?;
            Ok(true)
        }
    }

    /// Empty the store and the in-memory table for every file
    ///
    /// Visibility flags are kept, matching [`BreakpointRegistry::clear_all`].
    /// On failure nothing in memory is touched.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        for state in self.buffers.values_mut() {
            state.placed.clear();
        }
        self.conditions.clear();
        self.dirty = false;
        debug!("breakpoint store emptied");
        Ok(())
    }

    /// Empty the placed set and conditions for one file, leaving others
    /// untouched
    pub fn clear_all(&mut self, file: &Path) -> Result<()> {
        if file.as_os_str().is_empty() {
            return Err(StoreError::EmptyPath);
        }
        if let Some(state) = self.buffers.get_mut(file) {
            if !state.placed.is_empty() {
                state.placed.clear();
                self.dirty = true;
            }
        }
        self.conditions.clear_file(file);
        Ok(())
    }

    /// Set whether signs for this file should be rendered
    pub fn set_visible(&mut self, file: &Path, show: bool) {
        self.buffers.entry(file.to_path_buf()).or_default().visible = show;
    }

    pub fn visible(&self, file: &Path) -> bool {
        self.buffers.get(file).map_or(false, BufferState::visible)
    }

    pub fn has_breakpoint(&self, file: &Path, line: u32) -> bool {
        self.buffers
            .get(file)
            .map_or(false, |s| s.placed.contains(&line))
    }

    /// Placed lines for one file, ascending
    pub fn placed_lines(&self, file: &Path) -> Vec<u32> {
        self.buffers
            .get(file)
            .map(|s| s.placed.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn condition(&self, file: &Path, line: u32) -> Option<&str> {
        self.conditions.get(file, line)
    }

    /// Breakpoint records for one file, with conditions attached
    pub fn breakpoints_for(&self, file: &Path) -> Vec<Breakpoint> {
        self.placed_lines(file)
            .into_iter()
            .map(|line| Breakpoint {
                file: file.to_path_buf(),
                line,
                condition: self.conditions.get(file, line).map(str::to_string),
            })
            .collect()
    }

    /// Every breakpoint in the table, ordered by file then line
    pub fn all_breakpoints(&self) -> Vec<Breakpoint> {
        self.buffers
            .keys()
            .flat_map(|file| self.breakpoints_for(file))
            .collect()
    }

    /// Files the registry currently tracks
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.buffers.keys().map(PathBuf::as_path)
    }
}

fn validate(file: &Path, line: u32) -> Result<()> {
    if file.as_os_str().is_empty() {
        return Err(StoreError::EmptyPath);
    }
    if line == 0 {
        return Err(StoreError::InvalidLine(line));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_store::StorePaths;
    use tempfile::TempDir;

    fn registry(dir: &TempDir) -> BreakpointRegistry {
        let store = Store::open(StorePaths::with_config_dir(dir.path())).unwrap();
        BreakpointRegistry::open(store).unwrap()
    }

    #[test]
    fn test_load_scenario_from_store_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("saved-breakpoints"),
            "b /a.py:10\nb /a.py:20, x>5\n",
        )
        .unwrap();

        let reg = registry(&dir);
        assert_eq!(reg.placed_lines(Path::new("/a.py")), vec![10, 20]);
        assert_eq!(reg.condition(Path::new("/a.py"), 20), Some("x>5"));
        assert_eq!(reg.condition(Path::new("/a.py"), 10), None);
    }

    #[test]
    fn test_place_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut reg = registry(&dir);
        let file = Path::new("/a.py");

        reg.place(file, 10, None).unwrap();
        reg.place(file, 10, None).unwrap();

        assert_eq!(reg.placed_lines(file), vec![10]);
    }

    #[test]
    fn test_toggle_involution() {
        let dir = TempDir::new().unwrap();
        let mut reg = registry(&dir);
        let file = Path::new("/a.py");

        assert!(reg.toggle(file, 5).unwrap());
        assert!(reg.has_breakpoint(file, 5));
        assert!(!reg.toggle(file, 5).unwrap());
        assert!(reg.placed_lines(file).is_empty());
    }

    #[test]
    fn test_clear_all_is_cross_file_isolated() {
        let dir = TempDir::new().unwrap();
        let mut reg = registry(&dir);
        let a = Path::new("/a.py");
        let b = Path::new("/b.py");
        reg.place(a, 1, None).unwrap();
        reg.place(b, 2, Some("x>1")).unwrap();

        reg.clear_all(a).unwrap();

        assert!(reg.placed_lines(a).is_empty());
        assert_eq!(reg.placed_lines(b), vec![2]);
        assert_eq!(reg.condition(b, 2), Some("x>1"));
    }

    #[test]
    fn test_reset_empties_store_and_memory() {
        let dir = TempDir::new().unwrap();
        let mut reg = registry(&dir);
        let a = Path::new("/a.py");
        let b = Path::new("/b.py");
        reg.place(a, 1, Some("x>1")).unwrap();
        reg.place(b, 2, None).unwrap();
        reg.save().unwrap();

        reg.reset().unwrap();

        assert!(reg.placed_lines(a).is_empty());
        assert!(reg.placed_lines(b).is_empty());
        assert_eq!(reg.condition(a, 1), None);
        assert!(!reg.is_dirty());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("saved-breakpoints")).unwrap(),
            ""
        );
    }

    #[test]
    fn test_remove_drops_condition() {
        let dir = TempDir::new().unwrap();
        let mut reg = registry(&dir);
        let file = Path::new("/a.py");
        reg.place(file, 7, Some("n == 0")).unwrap();

        reg.remove(file, 7).unwrap();
        reg.place(file, 7, None).unwrap();

        assert_eq!(reg.condition(file, 7), None);
    }

    #[test]
    fn test_rejects_invalid_arguments() {
        let dir = TempDir::new().unwrap();
        let mut reg = registry(&dir);
        assert!(matches!(
            reg.place(Path::new("/a.py"), 0, None),
            Err(StoreError::InvalidLine(0))
        ));
        assert!(matches!(
            reg.toggle(Path::new(""), 1),
            Err(StoreError::EmptyPath)
        ));
    }

    #[test]
    fn test_save_then_reload_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut reg = registry(&dir);
        let file = Path::new("/a.py");
        reg.place(file, 3, Some("len(v) > 2")).unwrap();
        reg.place(file, 1, None).unwrap();
        assert!(reg.is_dirty());

        reg.save().unwrap();
        assert!(!reg.is_dirty());

        let reg2 = registry(&dir);
        assert_eq!(reg2.placed_lines(file), vec![1, 3]);
        assert_eq!(reg2.condition(file, 3), Some("len(v) > 2"));
    }

    #[test]
    fn test_failed_save_stays_dirty_for_retry() {
        let dir = TempDir::new().unwrap();
        let cfg = dir.path().join("cfg");
        let store = Store::open(StorePaths::with_config_dir(&cfg)).unwrap();
        let mut reg = BreakpointRegistry::open(store).unwrap();
        let file = Path::new("/a.py");
        reg.place(file, 4, None).unwrap();

        // Replace the store directory with a plain file so the save cannot
        // stage its write.
        std::fs::remove_dir_all(&cfg).unwrap();
        std::fs::write(&cfg, "").unwrap();

        assert!(reg.save().is_err());
        assert!(reg.is_dirty());
        assert_eq!(reg.placed_lines(file), vec![4]);

        // Re-issuing the save once the directory is back succeeds
        std::fs::remove_file(&cfg).unwrap();
        reg.save().unwrap();
        assert!(!reg.is_dirty());
    }

    #[test]
    fn test_failed_load_retains_previous_state() {
        let dir = TempDir::new().unwrap();
        let mut reg = registry(&dir);
        let file = Path::new("/a.py");
        reg.place(file, 4, None).unwrap();

        std::fs::write(dir.path().join("saved-breakpoints"), "not a record\n").unwrap();

        assert!(reg.load().is_err());
        assert_eq!(reg.placed_lines(file), vec![4]);
    }

    #[test]
    fn test_visibility_survives_reload() {
        let dir = TempDir::new().unwrap();
        let mut reg = registry(&dir);
        let file = Path::new("/a.py");
        reg.place(file, 4, None).unwrap();
        reg.set_visible(file, true);
        reg.save().unwrap();

        reg.load().unwrap();
        assert!(reg.visible(file));
    }

    #[test]
    fn test_set_visible_does_not_mutate_placed() {
        let dir = TempDir::new().unwrap();
        let mut reg = registry(&dir);
        let file = Path::new("/a.py");
        reg.place(file, 4, None).unwrap();
        reg.save().unwrap();

        reg.set_visible(file, true);
        reg.set_visible(file, false);

        assert_eq!(reg.placed_lines(file), vec![4]);
        assert!(!reg.is_dirty());
    }
}
