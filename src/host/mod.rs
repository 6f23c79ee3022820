//! Host adapter: the real platform behind the orchestrator's seams.
//!
//! - [`install`] - Installation marker and storage-permission probe
//! - [`services`] - Run records, liveness and detached service starts
//! - [`outbox`] - Prompts, notices and routes queued for the host loop
//!
//! [`Host::new`] wires these together from a loaded config.

pub mod install;
pub mod outbox;
pub mod services;

pub use install::{HostEnvironment, MarkerInstallation};
pub use outbox::Outbox;
pub use services::{is_pid_alive, PidFileRegistry, ProcessServiceManager, ServiceRecord};

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::StartgateConfig;
use crate::orchestrator::StartupOrchestrator;
use crate::permission::{PermissionGate, PermissionId, STORAGE_WRITE};
use crate::probe::TcpReachability;
use crate::service::{CapabilityLevel, ServiceLauncher};
use crate::state::{FileGrants, PreferenceStore, StateDir};

/// Environment variable overriding the platform capability level.
pub const CAPABILITY_ENV: &str = "STARTGATE_CAPABILITY_LEVEL";

/// Resolve the capability level: the environment wins over the config.
///
/// With neither set, the camera's modern threshold is used so the modern
/// variant is selected.
pub fn resolve_capability(config: &StartgateConfig) -> CapabilityLevel {
    let from_env = match std::env::var(CAPABILITY_ENV) {
        Ok(raw) => match raw.trim().parse::<u32>() {
            Ok(level) => Some(level),
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}", CAPABILITY_ENV, raw);
                None
            }
        },
        Err(_) => None,
    };
    let level = from_env
        .or(config.platform.capability_level)
        .unwrap_or(config.services.camera.min_modern_level);
    CapabilityLevel::new(level)
}

/// The wired-up host side of one startgate process.
pub struct Host {
    project_root: PathBuf,
    config: StartgateConfig,
    state_dir: StateDir,
    grants: FileGrants,
    outbox: Outbox,
}

impl Host {
    /// Prepare a host for `project_root` using `config`.
    pub fn new(project_root: &Path, config: StartgateConfig) -> Self {
        let state_dir = StateDir::for_project(project_root);
        Self {
            project_root: project_root.to_path_buf(),
            grants: FileGrants::new(state_dir.clone()),
            config,
            state_dir,
            outbox: Outbox::new(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &StartgateConfig {
        &self.config
    }

    pub fn state_dir(&self) -> &StateDir {
        &self.state_dir
    }

    /// The persisted grant table.
    pub fn grants(&self) -> &FileGrants {
        &self.grants
    }

    /// Queue the orchestrator writes into.
    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    pub fn installation(&self) -> MarkerInstallation {
        MarkerInstallation::new(&self.project_root, &self.config.install.marker)
    }

    /// Storage permission the environment probe checks.
    pub fn probed_permission(&self) -> PermissionId {
        self.config
            .permissions
            .probed()
            .cloned()
            .unwrap_or_else(|| PermissionId::new(STORAGE_WRITE))
    }

    pub fn environment(&self) -> HostEnvironment {
        HostEnvironment::new(
            self.installation(),
            self.grants.clone(),
            self.probed_permission(),
        )
    }

    pub fn reachability(&self) -> TcpReachability {
        TcpReachability::new(
            self.config.network.targets.clone(),
            Duration::from_millis(self.config.network.timeout_ms),
        )
    }

    pub fn registry(&self) -> PidFileRegistry {
        PidFileRegistry::new(self.state_dir.clone())
    }

    pub fn preferences(&self) -> PreferenceStore {
        PreferenceStore::new(
            self.state_dir.clone(),
            self.config.settings.camera_server_enabled,
        )
    }

    /// A launcher over the host's registry and process manager.
    pub fn launcher(&self) -> ServiceLauncher {
        ServiceLauncher::new(
            Box::new(self.registry()),
            Box::new(ProcessServiceManager::new(
                self.state_dir.clone(),
                self.config.services.clone(),
                self.project_root.clone(),
            )),
            Box::new(self.preferences()),
            resolve_capability(&self.config),
        )
        .with_camera_policy(self.config.services.camera.policy())
    }

    /// An orchestrator whose prompts, notices and routes land in [`outbox`](Self::outbox).
    pub fn orchestrator(&self) -> StartupOrchestrator {
        StartupOrchestrator::new(
            Box::new(self.environment()),
            Box::new(self.reachability()),
            PermissionGate::new(Box::new(self.outbox.clone())),
            self.launcher(),
            Box::new(self.outbox.clone()),
            Box::new(self.outbox.clone()),
        )
        .with_storage_permissions(self.config.permissions.requested())
    }
}
