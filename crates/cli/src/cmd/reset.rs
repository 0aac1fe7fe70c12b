//! Empty the whole breakpoint store

use anyhow::{Context, Result};
use bp_sync::BreakpointRegistry;

pub fn run(registry: &mut BreakpointRegistry, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("this removes every breakpoint for every file; pass --yes to confirm");
    }

    registry
        .reset()
        .context("failed to empty breakpoint store")?;
    println!("Breakpoint store emptied");
    Ok(())
}
