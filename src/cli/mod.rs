//! Command-line interface for startgate.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, PassArgs, PrefsArgs, StatusArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
