//! fragment-composer CLI library exports.
//!
//! The binary in `main.rs` is a thin wrapper over these modules so the
//! command implementations can be tested without spawning a process.

pub mod commands;
pub mod config;
pub mod errors;
pub mod output;
