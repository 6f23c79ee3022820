//! Configuration schema definitions for startgate.
//!
//! This module contains the struct definitions that map to the
//! `.startgate/config.yml` file format. Every section is optional.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::permission::{PermissionId, PermissionSet, STORAGE_READ, STORAGE_WRITE};
use crate::service::{CameraPolicy, CapabilityLevel, ServiceId, ServiceVariant};

/// Root configuration structure for `.startgate/config.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StartgateConfig {
    /// Application name (for display purposes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Where the installation marker lives
    pub install: InstallConfig,

    /// Follow-up flow handoff commands
    pub flows: FlowsConfig,

    /// Permissions requested before services start
    pub permissions: PermissionsConfig,

    /// Reachability probe settings
    pub network: NetworkConfig,

    /// Platform capability settings
    pub platform: PlatformConfig,

    /// Background service commands
    pub services: ServicesConfig,

    /// Global settings
    pub settings: Settings,
}

impl StartgateConfig {
    /// Display name, falling back to a generic title.
    pub fn display_name(&self) -> &str {
        self.app_name.as_deref().unwrap_or("Print Host")
    }
}

/// Installation state location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Marker file written by the installer (relative to project root)
    pub marker: PathBuf,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            marker: PathBuf::from(".startgate/runtime/.installed"),
        }
    }
}

/// Handoff commands for the install and main flows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowsConfig {
    /// Run when a pass routes to installation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<FlowConfig>,

    /// Run when a pass routes to normal operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<FlowConfig>,
}

/// One handoff command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Shell command that takes over control
    pub command: String,
}

/// Permission configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    /// Storage permission set; the first entry is the one probed
    pub storage: Vec<PermissionId>,
}

impl PermissionsConfig {
    /// The permission probed to decide whether a prompt is needed.
    pub fn probed(&self) -> Option<&PermissionId> {
        self.storage.first()
    }

    /// The full set requested by the prompt.
    pub fn requested(&self) -> PermissionSet {
        self.storage.iter().cloned().collect()
    }
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            storage: vec![
                PermissionId::new(STORAGE_WRITE),
                PermissionId::new(STORAGE_READ),
            ],
        }
    }
}

/// Reachability probe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// `ip:port` targets tried in order
    pub targets: Vec<String>,

    /// Per-target connect timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                "1.1.1.1:443".to_string(),
                "8.8.8.8:443".to_string(),
                "9.9.9.9:443".to_string(),
            ],
            timeout_ms: 2000,
        }
    }
}

/// Platform capability configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Capability level of this platform; unset means the modern threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_level: Option<u32>,
}

/// Commands for each background service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// The print server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_server: Option<ServiceCommand>,

    /// The camera server
    pub camera: CameraConfig,
}

impl ServicesConfig {
    /// The command configured for a service variant.
    pub fn command_for(&self, service: ServiceId, variant: ServiceVariant) -> Option<&str> {
        let command = match (service, variant) {
            (ServiceId::PrintServer, _) => self.print_server.as_ref(),
            (ServiceId::Camera, ServiceVariant::Legacy) => self.camera.legacy.as_ref(),
            // A standard camera request means whichever implementation is newest.
            (ServiceId::Camera, _) => self.camera.modern.as_ref(),
        };
        command.map(|c| c.command.as_str())
    }
}

/// A background service command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCommand {
    /// Shell command that runs the service in the foreground
    pub command: String,
}

/// Camera server variants and selection threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Variant for platforms at or above `min_modern_level`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modern: Option<ServiceCommand>,

    /// Variant for older platforms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy: Option<ServiceCommand>,

    /// Lowest capability level running the modern variant
    pub min_modern_level: u32,
}

impl CameraConfig {
    /// The selection policy described by this section.
    pub fn policy(&self) -> CameraPolicy {
        CameraPolicy {
            min_modern_level: CapabilityLevel::new(self.min_modern_level),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            modern: None,
            legacy: None,
            min_modern_level: CameraPolicy::DEFAULT_MIN_MODERN_LEVEL,
        }
    }
}

/// Global settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default for the camera preference until the user changes it
    #[serde(default, skip_serializing_if = "is_false")]
    pub camera_server_enabled: bool,

    /// Default output mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputMode>,
}

/// Output mode as written in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    Normal,
    Quiet,
    Silent,
}

fn is_false(v: &bool) -> bool {
    !v
}
