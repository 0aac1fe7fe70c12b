//! Lossless text round-trip of the breakpoint store format
//!
//! One record per line:
//!
//! ```text
//! b <absolute-file-path>:<line>
//! b <absolute-file-path>:<line>, <condition-expression>
//! ```
//!
//! The format has no escaping. A condition whose own text contains `", "` is
//! split and rejoined on decode, which normalizes its internal whitespace;
//! this is a known limitation of the format, not something the decoder tries
//! to fix.

use crate::breakpoint::Breakpoint;
use crate::error::StoreError;
use crate::Result;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Decode the full text of a store file
///
/// Empty lines are tolerated, trailing whitespace is stripped. Any malformed
/// line (missing `b ` prefix, missing `:`, non-numeric or zero line number)
/// aborts the decode with [`StoreError::Parse`] so that no breakpoint is
/// silently dropped.
pub fn decode(text: &str) -> Result<Vec<Breakpoint>> {
    let mut records = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim_end();
        if trimmed.is_empty() {
            continue;
        }

        let body = trimmed
            .strip_prefix("b ")
            .ok_or_else(|| StoreError::parse(line_no, raw, "missing 'b ' prefix"))?;

        let (file, rest) = body
            .split_once(':')
            .ok_or_else(|| StoreError::parse(line_no, raw, "missing ':' separator"))?;
        if file.is_empty() {
            return Err(StoreError::parse(line_no, raw, "empty file path"));
        }

        // First ", "-token is the line number, the rest is condition text
        // rejoined verbatim (the condition may itself contain commas).
        let mut tokens = rest.split(", ");
        let num_field = tokens.next().unwrap_or_default();
        let line = num_field
            .parse::<u32>()
            .map_err(|_| StoreError::parse(line_no, raw, "non-numeric line field"))?;
        if line == 0 {
            return Err(StoreError::parse(line_no, raw, "line numbers are 1-based"));
        }

        let condition: Vec<&str> = tokens.collect();
        let mut bp = Breakpoint::new(PathBuf::from(file), line)?;
        if !condition.is_empty() {
            bp = bp.with_condition(condition.join(", "));
        }
        records.push(bp);
    }

    Ok(records)
}

/// Encode breakpoints as store-file text
///
/// Deterministic: files sorted lexicographically, lines within a file sorted
/// ascending, duplicates collapsed. Repeated encodes of the same logical
/// state are byte-identical.
pub fn encode(records: &[Breakpoint]) -> String {
    let mut by_file: BTreeMap<&PathBuf, BTreeMap<u32, Option<&str>>> = BTreeMap::new();
    for bp in records {
        by_file
            .entry(&bp.file)
            .or_default()
            .insert(bp.line, bp.condition.as_deref());
    }

    let mut out = String::new();
    for (file, lines) in by_file {
        for (line, condition) in lines {
            match condition {
                Some(cond) => {
                    let _ = writeln!(out, "b {}:{}, {}", file.display(), line, cond);
                }
                None => {
                    let _ = writeln!(out, "b {}:{}", file.display(), line);
                }
            }
        }
    }
    out
}
