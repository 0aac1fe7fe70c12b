//! CLI command implementations

pub mod clear;
pub mod list;
pub mod reset;
pub mod set;
pub mod signs;
pub mod status;
pub mod toggle;
pub mod unset;
