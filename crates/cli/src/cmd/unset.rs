//! Remove a breakpoint

use anyhow::{Context, Result};
use bp_sync::BreakpointRegistry;
use std::path::Path;

pub fn run(registry: &mut BreakpointRegistry, file: &Path, line: u32) -> Result<()> {
    registry
        .remove(file, line)
        .context("failed to remove breakpoint")?;
    registry.save().context("failed to save breakpoint store")?;
    println!("Breakpoint removed from {}:{}", file.display(), line);
    Ok(())
}
