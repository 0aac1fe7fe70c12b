//! Remove every breakpoint in one file

use anyhow::{Context, Result};
use bp_sync::BreakpointRegistry;
use std::path::Path;

pub fn run(registry: &mut BreakpointRegistry, file: &Path) -> Result<()> {
    let count = registry.placed_lines(file).len();
    registry
        .clear_all(file)
        .context("failed to clear breakpoints")?;
    registry.save().context("failed to save breakpoint store")?;
    println!("Cleared {} breakpoints from {}", count, file.display());
    Ok(())
}
