//! Diff-based synchronization of editor sign markers
//!
//! Makes the editor's rendered markers match the registry's placed set
//! exactly. The editor does not deduplicate sign commands, so the
//! synchronizer tracks what it has issued and never re-places an
//! already-rendered line. Removes for stale lines are issued, and fully
//! applied, before any place reuses an id.

use crate::backend::DebuggerBackend;
use crate::registry::BreakpointRegistry;
use bp_core::{Result, SignId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Visual style of a breakpoint sign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignStyle {
    /// Sign name registered with the editor
    pub name: String,
    /// Glyph shown in the sign column
    pub glyph: String,
    /// Highlight group applied to the glyph
    pub highlight_group: String,
}

impl Default for SignStyle {
    fn default() -> Self {
        Self {
            name: "pudbbp".to_string(),
            glyph: "!".to_string(),
            highlight_group: "debug".to_string(),
        }
    }
}

/// Consumer of marker instructions (the editor side of the protocol)
pub trait SignSink {
    /// One-time style registration
    fn define(&mut self, style: &SignStyle) -> Result<()>;
    /// Render a marker for `line` of `file`
    fn place(&mut self, id: SignId, line: u32, style: &SignStyle, file: &Path) -> Result<()>;
    /// Clear the marker with `id` from `file`
    fn remove(&mut self, id: SignId, file: &Path) -> Result<()>;
}

/// Reconciles registry state against the editor's rendered markers
pub struct SignSynchronizer {
    style: SignStyle,
    /// Lines per file a marker has been issued for and not yet removed
    rendered: BTreeMap<PathBuf, BTreeSet<u32>>,
    defined: bool,
}

impl SignSynchronizer {
    pub fn new(style: SignStyle) -> Self {
        Self {
            style,
            rendered: BTreeMap::new(),
            defined: false,
        }
    }

    pub fn style(&self) -> &SignStyle {
        &self.style
    }

    /// Lines currently rendered for `file`, ascending
    pub fn rendered_lines(&self, file: &Path) -> Vec<u32> {
        self.rendered
            .get(file)
            .map(|lines| lines.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Bring the editor's markers for `file` in line with the registry
    ///
    /// When the file's signs are toggled off, every rendered marker is
    /// removed. Interrupted runs leave the rendered set reflecting exactly
    /// the instructions that were applied, so a retry resumes cleanly.
    pub fn render(
        &mut self,
        registry: &BreakpointRegistry,
        file: &Path,
        sink: &mut dyn SignSink,
    ) -> Result<()> {
        if !self.defined {
            sink.define(&self.style)?;
            self.defined = true;
        }

        let want: BTreeSet<u32> = if registry.visible(file) {
            registry.placed_lines(file).into_iter().collect()
        } else {
            BTreeSet::new()
        };

        let rendered = self.rendered.entry(file.to_path_buf()).or_default();

        // Stale markers first: ids derive from lines, so a reused id must be
        // unplaced before it is placed again.
        let stale: Vec<u32> = rendered.difference(&want).copied().collect();
        for line in stale {
            sink.remove(SignId::for_line(line), file)?;
            rendered.remove(&line);
        }

        let missing: Vec<u32> = want.difference(rendered).copied().collect();
        for line in missing {
            sink.place(SignId::for_line(line), line, &self.style, file)?;
            rendered.insert(line);
        }

        debug!(file = %file.display(), rendered = rendered.len(), "signs rendered");
        Ok(())
    }

    /// Fold backend-set breakpoints for `file` into the registry and write
    /// the combined list back
    ///
    /// Backend breakpoints belonging to other files pass through unchanged,
    /// so synchronizing one file never drops another file's breakpoints.
    pub fn reconcile_with_backend(
        &mut self,
        registry: &mut BreakpointRegistry,
        file: &Path,
        backend: &mut dyn DebuggerBackend,
    ) -> Result<()> {
        let all = backend.load_breakpoints()?;

        for bp in all.iter().filter(|bp| bp.file == file) {
            if !registry.has_breakpoint(file, bp.line) {
                registry.place(file, bp.line, bp.condition.as_deref())?;
            }
        }

        let mut combined: Vec<_> = all.into_iter().filter(|bp| bp.file != file).collect();
        combined.extend(registry.breakpoints_for(file));
        backend.save_breakpoints(&combined)?;
        Ok(())
    }
}

impl Default for SignSynchronizer {
    fn default() -> Self {
        Self::new(SignStyle::default())
    }
}

/// Sign sink that renders vim ex-commands into a line buffer
///
/// Produces the `:sign` command strings an editor adapter (or the CLI's
/// `signs` command) feeds to vim.
#[derive(Debug, Default)]
pub struct VimCommandSink {
    commands: Vec<String>,
}

impl VimCommandSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<String> {
        self.commands
    }
}

impl SignSink for VimCommandSink {
    fn define(&mut self, style: &SignStyle) -> Result<()> {
        self.commands.push(format!(
            "sign define {} text={} texthl={}",
            style.name, style.glyph, style.highlight_group
        ));
        Ok(())
    }

    fn place(&mut self, id: SignId, line: u32, style: &SignStyle, file: &Path) -> Result<()> {
        self.commands.push(format!(
            "sign place {} line={} name={} file={}",
            id,
            line,
            style.name,
            file.display()
        ));
        Ok(())
    }

    fn remove(&mut self, id: SignId, file: &Path) -> Result<()> {
        self.commands
            .push(format!("sign unplace {} file={}", id, file.display()));
        Ok(())
    }
}
