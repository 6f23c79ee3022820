//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. `launch` and `install` share one
//! implementation, [`PassCommand`](pass::PassCommand), differing only in
//! the trigger they feed the orchestrator.

pub mod dispatcher;
pub mod pass;
pub mod prefs;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::{Path, PathBuf};

use crate::config::{load_config, validate, StartgateConfig};
use crate::error::Result;
use crate::ui::{OutputMode, UserInterface};

/// Load and validate the config for `project_root`.
pub(crate) fn load_validated(
    project_root: &Path,
    config_override: Option<&PathBuf>,
) -> Result<StartgateConfig> {
    let config = load_config(project_root, config_override.map(|p| p.as_path()))?;
    validate(&config)?;
    Ok(config)
}

/// Apply the configured output mode unless a flag already chose one.
pub(crate) fn apply_output_setting(config: &StartgateConfig, ui: &mut dyn UserInterface) {
    if let Some(mode) = config.settings.output {
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(mode.into());
        }
    }
}
