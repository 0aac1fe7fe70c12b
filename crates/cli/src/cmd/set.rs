//! Place a breakpoint, optionally conditional

use anyhow::{Context, Result};
use bp_sync::BreakpointRegistry;
use std::path::Path;

pub fn run(
    registry: &mut BreakpointRegistry,
    file: &Path,
    line: u32,
    condition: Option<&str>,
) -> Result<()> {
    let bp = registry
        .place(file, line, condition)
        .context("failed to place breakpoint")?;
    registry.save().context("failed to save breakpoint store")?;

    match bp.condition {
        Some(cond) => println!(
            "Breakpoint set at {}:{} if {}",
            file.display(),
            line,
            cond
        ),
        None => println!("Breakpoint set at {}:{}", file.display(), line),
    }
    Ok(())
}
