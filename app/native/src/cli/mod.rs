//! Command-line interface.
//!
//! The configuration is loaded here, once per invocation, and passed down to
//! each command.

mod commands;
mod output;

pub use commands::Cli;
