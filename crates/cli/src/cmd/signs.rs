//! Print the vim sign commands that render a file's breakpoints
//!
//! Lets shell-level editor integrations source the output directly.

use anyhow::{Context, Result};
use bp_sync::{BreakpointRegistry, SignStyle, SignSynchronizer, VimCommandSink};
use std::path::Path;

pub fn run(registry: &mut BreakpointRegistry, file: &Path, style: &SignStyle) -> Result<()> {
    for command in commands(registry, file, style)? {
        println!("{command}");
    }
    Ok(())
}

/// The command sequence for a fresh render of `file`
pub fn commands(
    registry: &mut BreakpointRegistry,
    file: &Path,
    style: &SignStyle,
) -> Result<Vec<String>> {
    registry.set_visible(file, true);
    let mut synchronizer = SignSynchronizer::new(style.clone());
    let mut sink = VimCommandSink::new();
    synchronizer
        .render(registry, file, &mut sink)
        .context("failed to render signs")?;
    Ok(sink.into_commands())
}
