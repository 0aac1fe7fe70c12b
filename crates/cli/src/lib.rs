//! Library surface of the bpm binary, split out so integration tests can
//! drive the commands directly against a temporary store directory.

pub mod cmd;
pub mod config;
pub mod util;
