//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, PassArgs};
use crate::error::Result;
use crate::orchestrator::Trigger;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            config_override: None,
        }
    }

    /// Load the config from `path` instead of the project's `.startgate/config.yml`.
    pub fn with_config_override(mut self, path: Option<PathBuf>) -> Self {
        self.config_override = path;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn pass(&self, trigger: Trigger, args: &PassArgs) -> super::pass::PassCommand {
        super::pass::PassCommand::new(&self.project_root, trigger, args.clone())
            .with_config_override(self.config_override.clone())
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config_override = self.config_override.clone();
        match &cli.command {
            Some(Commands::Launch(args)) => self.pass(Trigger::Launch, args).execute(ui),
            Some(Commands::Install(args)) => self.pass(Trigger::InstallRequested, args).execute(ui),
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(&self.project_root, args.clone())
                    .with_config_override(config_override);
                cmd.execute(ui)
            }
            Some(Commands::Prefs(args)) => {
                let cmd = super::prefs::PrefsCommand::new(&self.project_root, args.clone())
                    .with_config_override(config_override);
                cmd.execute(ui)
            }
            None => self.pass(Trigger::Launch, &PassArgs::default()).execute(ui),
        }
    }
}
