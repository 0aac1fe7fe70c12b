//! Show all breakpoints grouped by file

use anyhow::Result;
use bp_sync::BreakpointRegistry;
use owo_colors::OwoColorize;

pub fn run(registry: &BreakpointRegistry, json: bool) -> Result<()> {
    if json {
        let all = registry.all_breakpoints();
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }

    println!("{}", "Breakpoints".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let files: Vec<_> = registry.files().map(|f| f.to_path_buf()).collect();
    let mut total = 0usize;
    for file in &files {
        let breakpoints = registry.breakpoints_for(file);
        if breakpoints.is_empty() {
            continue;
        }
        total += breakpoints.len();

        let shown = if registry.visible(file) { "shown" } else { "hidden" };
        println!();
        println!(
            "{} ({} breakpoints, signs {})",
            file.display().to_string().cyan(),
            breakpoints.len(),
            shown
        );
        for bp in breakpoints {
            match bp.condition {
                Some(cond) => println!("  {:>5}  if {}", bp.line.yellow(), cond),
                None => println!("  {:>5}", bp.line.yellow()),
            }
        }
    }

    println!();
    if total == 0 {
        println!("{}", "No breakpoints set".dimmed());
    } else {
        println!("{} breakpoints total", total);
    }
    Ok(())
}
