//! Durable breakpoint store shared with the debugger backend
//!
//! This crate provides:
//! - Config-directory and store-file path discovery
//! - One-time merging of per-version store files into the canonical file,
//!   replacing each with a filesystem link
//! - Atomic load/save of the canonical file

pub mod linkmerge;
pub mod paths;
pub mod store;

// Re-exports
pub use linkmerge::MergePlan;
pub use paths::StorePaths;
pub use store::Store;
