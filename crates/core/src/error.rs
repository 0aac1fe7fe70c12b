//! Error taxonomy for store and registry operations

use thiserror::Error;

/// Errors surfaced by the breakpoint store and registry
#[derive(Debug, Error)]
pub enum StoreError {
    /// A store-file line that cannot be decoded. The whole load aborts;
    /// a skipped line would mean a silently lost breakpoint.
    #[error("malformed store line {line_no}: {reason}: {text:?}")]
    Parse {
        /// 1-based line number within the store file
        line_no: usize,
        /// The offending line, verbatim
        text: String,
        /// What was wrong with it
        reason: String,
    },

    /// File read/write/link failure during load, save, or merge
    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Line numbers are 1-based; zero is rejected before any mutation
    #[error("invalid line number {0} (line numbers are 1-based)")]
    InvalidLine(u32),

    /// Breakpoints are keyed by file path; an empty path is rejected
    #[error("empty file path")]
    EmptyPath,
}

impl StoreError {
    pub(crate) fn parse(line_no: usize, text: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            line_no,
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
