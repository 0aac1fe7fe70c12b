//! Breakpoint data structures

use crate::error::StoreError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A breakpoint instructs the debugger backend to stop at `file:line`
///
/// The optional condition is a free-text expression the backend evaluates
/// before stopping; `None` means unconditional.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Absolute path of the source file
    pub file: PathBuf,
    /// 1-based line number
    pub line: u32,
    /// Optional condition expression
    pub condition: Option<String>,
}

impl Breakpoint {
    /// Create an unconditional breakpoint, validating arguments
    pub fn new(file: impl Into<PathBuf>, line: u32) -> Result<Self> {
        let file = file.into();
        if file.as_os_str().is_empty() {
            return Err(StoreError::EmptyPath);
        }
        if line == 0 {
            return Err(StoreError::InvalidLine(line));
        }
        Ok(Self {
            file,
            line,
            condition: None,
        })
    }

    /// Attach a condition expression
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

/// Conditions keyed by `(file, line)`
///
/// Entries exist only for conditional breakpoints; absence means
/// unconditional. Rebuilt in full on every store reload and written out in
/// full on every save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionTable {
    entries: BTreeMap<(PathBuf, u32), String>,
}

impl ConditionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, file: &Path, line: u32, condition: impl Into<String>) {
        self.entries
            .insert((file.to_path_buf(), line), condition.into());
    }

    pub fn get(&self, file: &Path, line: u32) -> Option<&str> {
        self.entries
            .get(&(file.to_path_buf(), line))
            .map(String::as_str)
    }

    pub fn remove(&mut self, file: &Path, line: u32) -> Option<String> {
        self.entries.remove(&(file.to_path_buf(), line))
    }

    /// Drop every condition belonging to `file`
    pub fn clear_file(&mut self, file: &Path) {
        self.entries.retain(|(f, _), _| f != file);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
