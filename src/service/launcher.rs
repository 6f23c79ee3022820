//! Idempotent service starts and camera variant selection.
//!
//! The `ServiceLauncher` never caches whether it started something. Every
//! start is preceded by a fresh [`ServiceRegistry`] query, so a service that
//! was killed outside the orchestrator gets started again on the next pass,
//! and a service that is already up is left alone no matter how many passes
//! run.
//!
//! # Example
//!
//! ```
//! use startgate::service::{select_camera_variant, CameraPolicy, CapabilityLevel, ServiceVariant};
//!
//! let policy = CameraPolicy::default();
//! assert_eq!(
//!     select_camera_variant(true, CapabilityLevel::new(30), &policy),
//!     Some(ServiceVariant::Modern)
//! );
//! assert_eq!(select_camera_variant(false, CapabilityLevel::new(30), &policy), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ServiceId, ServiceManager, ServiceRegistry, ServiceVariant, UserConfiguration};

/// Platform capability level (an API level or equivalent), ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityLevel(u32);

impl CapabilityLevel {
    /// Wrap a raw level.
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    /// The raw level.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Policy deciding which camera variant a platform gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraPolicy {
    /// Lowest capability level that runs the modern camera variant.
    pub min_modern_level: CapabilityLevel,
}

impl CameraPolicy {
    /// Default threshold for the modern camera variant.
    pub const DEFAULT_MIN_MODERN_LEVEL: u32 = 21;
}

impl Default for CameraPolicy {
    fn default() -> Self {
        Self {
            min_modern_level: CapabilityLevel::new(Self::DEFAULT_MIN_MODERN_LEVEL),
        }
    }
}

/// Pick the camera variant for a configuration and platform.
///
/// Returns `None` when the camera server is disabled. Depends on nothing
/// but its arguments.
pub fn select_camera_variant(
    camera_server_enabled: bool,
    level: CapabilityLevel,
    policy: &CameraPolicy,
) -> Option<ServiceVariant> {
    if !camera_server_enabled {
        return None;
    }
    if level >= policy.min_modern_level {
        Some(ServiceVariant::Modern)
    } else {
        Some(ServiceVariant::Legacy)
    }
}

/// Starts services exactly once, selecting variants by policy.
pub struct ServiceLauncher {
    registry: Box<dyn ServiceRegistry>,
    manager: Box<dyn ServiceManager>,
    user_config: Box<dyn UserConfiguration>,
    capability: CapabilityLevel,
    camera_policy: CameraPolicy,
}

impl ServiceLauncher {
    /// Create a launcher over the platform's registry, manager and user configuration.
    pub fn new(
        registry: Box<dyn ServiceRegistry>,
        manager: Box<dyn ServiceManager>,
        user_config: Box<dyn UserConfiguration>,
        capability: CapabilityLevel,
    ) -> Self {
        Self {
            registry,
            manager,
            user_config,
            capability,
            camera_policy: CameraPolicy::default(),
        }
    }

    /// Replace the camera policy.
    pub fn with_camera_policy(mut self, policy: CameraPolicy) -> Self {
        self.camera_policy = policy;
        self
    }

    /// The platform capability level this launcher selects variants for.
    pub fn capability(&self) -> CapabilityLevel {
        self.capability
    }

    /// The camera policy in effect.
    pub fn camera_policy(&self) -> &CameraPolicy {
        &self.camera_policy
    }

    /// Issue a start command for `service` unless it is already running.
    ///
    /// The registry is queried immediately before the command. A service
    /// running under a different variant counts as running.
    pub fn ensure_started(&mut self, service: ServiceId, variant: ServiceVariant) {
        if self.registry.is_running(service) {
            tracing::debug!("{} already running, skipping start", service);
            return;
        }
        tracing::info!("Starting {} ({})", service, variant);
        self.manager.start(service, variant);
    }

    /// Ensure the print server is running.
    pub fn ensure_print_server(&mut self) {
        self.ensure_started(ServiceId::PrintServer, ServiceVariant::Standard);
    }

    /// Ensure the camera server is running if the user enabled it.
    pub fn ensure_camera(&mut self) {
        let enabled = self.user_config.camera_server_enabled();
        match select_camera_variant(enabled, self.capability, &self.camera_policy) {
            Some(variant) => self.ensure_started(ServiceId::Camera, variant),
            None => tracing::debug!("Camera server disabled, not starting"),
        }
    }

    /// Start every configured service: the print server always, the camera per policy.
    pub fn start_configured_services(&mut self) {
        self.ensure_print_server();
        self.ensure_camera();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPlatform;

    fn launcher_for(platform: &MockPlatform, level: u32) -> ServiceLauncher {
        ServiceLauncher::new(
            Box::new(platform.clone()),
            Box::new(platform.clone()),
            Box::new(platform.clone()),
            CapabilityLevel::new(level),
        )
    }

    #[test]
    fn disabled_camera_selects_nothing() {
        let policy = CameraPolicy::default();
        for level in [0, 20, 21, 34] {
            assert_eq!(
                select_camera_variant(false, CapabilityLevel::new(level), &policy),
                None
            );
        }
    }

    #[test]
    fn threshold_level_selects_modern() {
        let policy = CameraPolicy::default();
        assert_eq!(
            select_camera_variant(true, CapabilityLevel::new(21), &policy),
            Some(ServiceVariant::Modern)
        );
        assert_eq!(
            select_camera_variant(true, CapabilityLevel::new(20), &policy),
            Some(ServiceVariant::Legacy)
        );
    }

    #[test]
    fn custom_policy_moves_threshold() {
        let policy = CameraPolicy {
            min_modern_level: CapabilityLevel::new(30),
        };
        assert_eq!(
            select_camera_variant(true, CapabilityLevel::new(29), &policy),
            Some(ServiceVariant::Legacy)
        );
    }

    #[test]
    fn ensure_started_issues_one_command() {
        let platform = MockPlatform::new();
        let mut launcher = launcher_for(&platform, 30);

        launcher.ensure_started(ServiceId::PrintServer, ServiceVariant::Standard);

        assert_eq!(
            platform.starts(),
            vec![(ServiceId::PrintServer, ServiceVariant::Standard)]
        );
    }

    #[test]
    fn ensure_started_skips_running_service() {
        let platform = MockPlatform::new();
        platform.set_running(ServiceId::PrintServer, ServiceVariant::Standard);
        let mut launcher = launcher_for(&platform, 30);

        launcher.ensure_started(ServiceId::PrintServer, ServiceVariant::Standard);

        assert!(platform.starts().is_empty());
    }

    #[test]
    fn repeated_calls_start_once_when_registry_reflects_start() {
        let platform = MockPlatform::new();
        let mut launcher = launcher_for(&platform, 30);

        launcher.ensure_print_server();
        launcher.ensure_print_server();

        assert_eq!(platform.starts().len(), 1);
    }

    #[test]
    fn externally_stopped_service_is_started_again() {
        let platform = MockPlatform::new();
        let mut launcher = launcher_for(&platform, 30);

        launcher.ensure_print_server();
        platform.stop(ServiceId::PrintServer);
        launcher.ensure_print_server();

        assert_eq!(platform.starts().len(), 2);
    }

    #[test]
    fn camera_running_as_other_variant_is_not_restarted() {
        let platform = MockPlatform::new().with_camera_enabled(true);
        platform.set_running(ServiceId::Camera, ServiceVariant::Legacy);
        let mut launcher = launcher_for(&platform, 30);

        launcher.ensure_camera();

        assert!(platform.starts().is_empty());
    }

    #[test]
    fn camera_uses_legacy_below_threshold() {
        let platform = MockPlatform::new().with_camera_enabled(true);
        let mut launcher = launcher_for(&platform, 19);

        launcher.ensure_camera();

        assert_eq!(
            platform.starts(),
            vec![(ServiceId::Camera, ServiceVariant::Legacy)]
        );
    }

    #[test]
    fn camera_preference_is_read_on_every_call() {
        let platform = MockPlatform::new();
        let mut launcher = launcher_for(&platform, 30);

        launcher.ensure_camera();
        assert!(platform.starts().is_empty());

        platform.set_camera_enabled(true);
        launcher.ensure_camera();
        assert_eq!(
            platform.starts(),
            vec![(ServiceId::Camera, ServiceVariant::Modern)]
        );
    }

    #[test]
    fn configured_services_start_print_server_before_camera() {
        let platform = MockPlatform::new().with_camera_enabled(true);
        let mut launcher = launcher_for(&platform, 30);

        launcher.start_configured_services();

        assert_eq!(
            platform.starts(),
            vec![
                (ServiceId::PrintServer, ServiceVariant::Standard),
                (ServiceId::Camera, ServiceVariant::Modern),
            ]
        );
    }
}
