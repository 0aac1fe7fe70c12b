//! List breakpoints for one file

use anyhow::Result;
use bp_sync::BreakpointRegistry;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(registry: &BreakpointRegistry, file: &Path) -> Result<()> {
    let breakpoints = registry.breakpoints_for(file);
    if breakpoints.is_empty() {
        println!("{}", "No breakpoints in this file".dimmed());
        return Ok(());
    }

    for bp in breakpoints {
        match bp.condition {
            Some(cond) => println!("{:>5}  if {}", bp.line.yellow(), cond),
            None => println!("{:>5}", bp.line.yellow()),
        }
    }
    Ok(())
}
