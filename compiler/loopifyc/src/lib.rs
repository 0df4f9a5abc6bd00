//! Loopify command-line driver.
//!
//! The binary in `main.rs` only dispatches on the subcommand; every command
//! lives in [`commands`] so it can be driven from tests.

pub mod commands;
pub mod diagnostics;
mod error;
pub mod logging;
pub mod pipeline;

pub use error::CliError;
