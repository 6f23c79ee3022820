//! Shell command execution and platform detection.

pub mod command;
pub mod platform;

pub use command::{execute_inherited, spawn_detached, CommandOptions};
pub use platform::{detect_shell, is_ci, ShellInfo, ShellType, SHELL_ENV};
