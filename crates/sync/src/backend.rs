//! Seam to the debugger backend's own breakpoint list
//!
//! The backend keeps an opaque list of `(file, line, condition?)` records it
//! can load and save. Breakpoints may be set from inside the debugger, so
//! the engine must be able to pull that list and fold it into the registry
//! without disturbing entries for files it is not editing.

use bp_core::{Breakpoint, Result};

/// Load/save access to the backend's breakpoint list
pub trait DebuggerBackend {
    fn load_breakpoints(&mut self) -> Result<Vec<Breakpoint>>;
    fn save_breakpoints(&mut self, breakpoints: &[Breakpoint]) -> Result<()>;
}
