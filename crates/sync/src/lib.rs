//! Breakpoint registry and sign synchronization
//!
//! This crate provides:
//! - The per-buffer authoritative breakpoint registry backed by the store
//! - Diff-based synchronization of editor sign markers
//! - The debugger-backend seam for reconciling externally set breakpoints

pub mod backend;
pub mod registry;
pub mod signs;

// Re-exports
pub use backend::DebuggerBackend;
pub use registry::{BreakpointRegistry, BufferState};
pub use signs::{SignSink, SignStyle, SignSynchronizer, VimCommandSink};
