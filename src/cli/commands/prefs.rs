//! Preferences command implementation.
//!
//! `startgate prefs` shows the camera preference; `--camera-server <bool>`
//! saves a new value and `--reset` returns to the config default. The next
//! pass picks up the change.

use std::path::{Path, PathBuf};

use crate::cli::args::PrefsArgs;
use crate::error::Result;
use crate::host::Host;
use crate::service::UserConfiguration;
use crate::state::Preferences;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{apply_output_setting, load_validated};

/// The prefs command implementation.
pub struct PrefsCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: PrefsArgs,
}

impl PrefsCommand {
    pub fn new(project_root: &Path, args: PrefsArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: None,
            args,
        }
    }

    pub fn with_config_override(mut self, path: Option<PathBuf>) -> Self {
        self.config_override = path;
        self
    }
}

impl Command for PrefsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_validated(&self.project_root, self.config_override.as_ref())?;
        apply_output_setting(&config, ui);
        let host = Host::new(&self.project_root, config);
        let dir = host.state_dir();
        let mut prefs = Preferences::load(dir)?;

        if self.args.reset {
            prefs.camera_server_enabled = None;
            prefs.save(dir)?;
            ui.success("Preferences reset to config defaults");
        } else if let Some(enabled) = self.args.camera_server {
            prefs.camera_server_enabled = Some(enabled);
            prefs.save(dir)?;
            ui.success(&format!(
                "Camera server {}",
                if enabled { "enabled" } else { "disabled" }
            ));
        }

        let effective = host.preferences().camera_server_enabled();
        let source = if prefs.camera_server_enabled.is_some() {
            "saved"
        } else {
            "default"
        };
        ui.show_field(
            "Camera server",
            &format!("{} ({})", if effective { "on" } else { "off" }, source),
        );

        Ok(CommandResult::success())
    }
}
