//! Core breakpoint model and store codec
//!
//! This crate provides:
//! - Breakpoint data structures (file, line, optional condition)
//! - Sign id mapping between editor markers and line numbers
//! - Lossless codec for the textual breakpoint store format
//! - Error taxonomy shared by the store and sync layers

pub mod breakpoint;
pub mod codec;
pub mod error;
pub mod sign;

// Re-exports
pub use breakpoint::{Breakpoint, ConditionTable};
pub use error::StoreError;
pub use sign::SignId;

/// Result type for breakpoint operations
pub type Result<T> = std::result::Result<T, StoreError>;
