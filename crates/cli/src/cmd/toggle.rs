//! Toggle a breakpoint at file:line

use anyhow::{Context, Result};
use bp_sync::BreakpointRegistry;
use std::path::Path;

pub fn run(registry: &mut BreakpointRegistry, file: &Path, line: u32) -> Result<()> {
    let placed = registry
        .toggle(file, line)
        .context("failed to toggle breakpoint")?;
    registry.save().context("failed to save breakpoint store")?;

    if placed {
        println!("Breakpoint set at {}:{}", file.display(), line);
    } else {
        println!("Breakpoint removed from {}:{}", file.display(), line);
    }
    Ok(())
}
