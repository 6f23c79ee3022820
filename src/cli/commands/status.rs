//! Status command implementation.
//!
//! `startgate status` reports what the next pass would find: installation,
//! storage permission, network, running services and the camera variant
//! that would be chosen.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::args::StatusArgs;
use crate::error::{Result, StartgateError};
use crate::host::Host;
use crate::permission::PermissionPlatform;
use crate::probe::ReachabilityProbe;
use crate::service::{
    select_camera_variant, CapabilityLevel, ServiceId, ServiceVariant, UserConfiguration,
};
use crate::state::{PassRecord, StateStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{apply_output_setting, load_validated};

/// Run state of one service.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub service: ServiceId,
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<ServiceVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// Everything `status` reports.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub installed: bool,
    pub storage_granted: bool,
    /// `None` when the check was skipped.
    pub network_reachable: Option<bool>,
    pub capability_level: CapabilityLevel,
    pub camera_server_enabled: bool,
    pub camera_variant: Option<ServiceVariant>,
    pub services: Vec<ServiceStatus>,
    pub last_pass: Option<PassRecord>,
}

/// The status command implementation.
pub struct StatusCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(project_root: &Path, args: StatusArgs) -> Self {
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

    fn collect(&self, host: &Host, ui: &mut dyn UserInterface) -> Result<StatusReport> {
        let network_reachable = if self.args.offline {
            None
        } else if self.args.json {
            Some(host.reachability().is_reachable())
        } else {
            let mut spinner = ui.start_spinner("Checking network connection...");
            let reachable = host.reachability().is_reachable();
            if reachable {
                spinner.finish_success("Network reachable");
            } else {
                spinner.finish_error("Network unreachable");
            }
            Some(reachable)
        };

        let launcher = host.launcher();
        let camera_server_enabled = host.preferences().camera_server_enabled();
        let camera_variant = select_camera_variant(
            camera_server_enabled,
            launcher.capability(),
            launcher.camera_policy(),
        );

        let registry = host.registry();
        let services = ServiceId::ALL
            .iter()
            .map(|&service| {
                let record = registry.running(service);
                ServiceStatus {
                    service,
                    running: record.is_some(),
                    variant: record.as_ref().map(|r| r.variant),
                    pid: record.as_ref().map(|r| r.pid),
                    started_at: record.as_ref().map(|r| r.started_at),
                }
            })
            .collect();

        Ok(StatusReport {
            installed: host.installation().is_installed(),
            storage_granted: host.grants().check_granted(&host.probed_permission()),
            network_reachable,
            capability_level: launcher.capability(),
            camera_server_enabled,
            camera_variant,
            services,
            last_pass: StateStore::load(host.state_dir())?.last_pass,
        })
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn show_report(report: &StatusReport, ui: &mut dyn UserInterface) {
    ui.show_field("Installed", yes_no(report.installed));
    ui.show_field("Storage", if report.storage_granted { "granted" } else { "not granted" });
    let network = match report.network_reachable {
        Some(true) => "reachable",
        Some(false) => "unreachable",
        None => "not checked",
    };
    ui.show_field("Network", network);
    ui.show_field("Capability", &report.capability_level.to_string());

    let camera = match report.camera_variant {
        Some(variant) => format!("enabled ({})", variant),
        None => "disabled".to_string(),
    };
    ui.show_field("Camera", &camera);

    ui.message("");
    ui.message("Services:");
    for status in &report.services {
        let state = match (status.variant, status.pid) {
            (Some(variant), Some(pid)) => format!("running ({}, pid {})", variant, pid),
            _ => "not running".to_string(),
        };
        ui.show_field(status.service.as_str(), &state);
    }

    if let Some(last) = &report.last_pass {
        ui.message("");
        ui.message(&format!(
            "Last pass: {} via {} ({})",
            last.timestamp.format("%Y-%m-%d %H:%M"),
            last.trigger,
            last.outcome
        ));
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_validated(&self.project_root, self.config_override.as_ref())?;
        apply_output_setting(&config, ui);
        let host = Host::new(&self.project_root, config);

        if !self.args.json {
            ui.show_header(&format!("{} - Status", host.config().display_name()));
        }
        let report = self.collect(&host, ui)?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| StartgateError::Other(e.into()))?;
            ui.message(&json);
        } else {
            show_report(&report, ui);
        }

        Ok(CommandResult::success())
    }
}
