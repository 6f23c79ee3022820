//! Background service identity, run-state queries and launching.
//!
//! # Modules
//!
//! - [`registry`] - Run-state queries and the start command seam
//! - [`launcher`] - Idempotent starts and camera variant selection

pub mod launcher;
pub mod registry;

pub use launcher::{select_camera_variant, CameraPolicy, CapabilityLevel, ServiceLauncher};
pub use registry::{ServiceManager, ServiceRegistry, UserConfiguration};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical identity of a background service.
///
/// Identity is independent of the variant a service runs as: a camera
/// service running as [`ServiceVariant::Legacy`] is still [`ServiceId::Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceId {
    /// The print-server process.
    PrintServer,
    /// The camera-streaming process.
    Camera,
}

impl ServiceId {
    /// All known services, in start order.
    pub const ALL: [ServiceId; 2] = [ServiceId::PrintServer, ServiceId::Camera];

    /// Stable string form, used for file names and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::PrintServer => "print-server",
            ServiceId::Camera => "camera",
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the alternative implementations of a logical service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceVariant {
    /// The only implementation of a single-variant service.
    Standard,
    /// Implementation requiring a recent platform capability level.
    Modern,
    /// Fallback implementation for older platforms.
    Legacy,
}

impl ServiceVariant {
    /// Stable string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceVariant::Standard => "standard",
            ServiceVariant::Modern => "modern",
            ServiceVariant::Legacy => "legacy",
        }
    }
}

impl fmt::Display for ServiceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_id_display_is_kebab_case() {
        assert_eq!(ServiceId::PrintServer.to_string(), "print-server");
        assert_eq!(ServiceId::Camera.to_string(), "camera");
    }

    #[test]
    fn service_id_serializes_like_display() {
        let yaml = serde_yaml::to_string(&ServiceId::PrintServer).unwrap();
        assert_eq!(yaml.trim(), "print-server");
        let parsed: ServiceId = serde_yaml::from_str("camera").unwrap();
        assert_eq!(parsed, ServiceId::Camera);
    }

    #[test]
    fn print_server_starts_first() {
        assert_eq!(ServiceId::ALL[0], ServiceId::PrintServer);
    }

    #[test]
    fn variant_parses_from_yaml() {
        let parsed: ServiceVariant = serde_yaml::from_str("legacy").unwrap();
        assert_eq!(parsed, ServiceVariant::Legacy);
        assert_eq!(ServiceVariant::Modern.as_str(), "modern");
    }
}
