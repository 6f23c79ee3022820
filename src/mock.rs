//! In-memory platform for testing.
//!
//! `MockPlatform` implements every platform seam the orchestrator talks to
//! and records each interaction for later assertion. Clones share state, so
//! one clone can be boxed into the orchestrator while the test keeps another
//! to configure the platform and inspect what happened.
//!
//! # Example
//!
//! ```
//! use startgate::mock::MockPlatform;
//! use startgate::orchestrator::{Notice, PassOutcome};
//!
//! let platform = MockPlatform::new().with_reachable(false);
//! let mut orchestrator = platform.orchestrator();
//!
//! let outcome = orchestrator.on_install_requested();
//! assert_eq!(outcome.notice(), Some(Notice::MissingNetwork));
//! assert!(platform.starts().is_empty());
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::orchestrator::{FlowRouter, Notice, NoticeSink, Route, StartupOrchestrator};
use crate::permission::{
    PermissionGate, PermissionId, PermissionPlatform, PermissionPrompter, PermissionSet,
    STORAGE_WRITE,
};
use crate::probe::{EnvironmentProbe, ReachabilityProbe};
use crate::service::{
    CapabilityLevel, ServiceId, ServiceLauncher, ServiceManager, ServiceRegistry, ServiceVariant,
    UserConfiguration,
};

#[derive(Debug)]
struct MockState {
    installed: bool,
    granted: HashMap<PermissionId, bool>,
    reachable: bool,
    camera_enabled: bool,
    capability: CapabilityLevel,
    reflect_starts: bool,
    running: HashMap<ServiceId, ServiceVariant>,
    starts: Vec<(ServiceId, ServiceVariant)>,
    prompts: Vec<PermissionSet>,
    notices: Vec<Notice>,
    routes: Vec<Route>,
    reachability_queries: usize,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            installed: false,
            granted: HashMap::new(),
            reachable: true,
            camera_enabled: false,
            capability: CapabilityLevel::new(30),
            reflect_starts: true,
            running: HashMap::new(),
            starts: Vec::new(),
            prompts: Vec::new(),
            notices: Vec::new(),
            routes: Vec::new(),
            reachability_queries: 0,
        }
    }
}

/// Shared in-memory platform.
///
/// Defaults: not installed, storage not granted, network reachable, camera
/// disabled, capability level 30, starts reflected in the registry.
#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    state: Rc<RefCell<MockState>>,
}

impl MockPlatform {
    /// Create a platform with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the installation state.
    pub fn with_installed(self, installed: bool) -> Self {
        self.set_installed(installed);
        self
    }

    /// Set whether the storage permission is granted.
    pub fn with_storage_granted(self, granted: bool) -> Self {
        self.state
            .borrow_mut()
            .granted
            .insert(PermissionId::new(STORAGE_WRITE), granted);
        self
    }

    /// Set network reachability.
    pub fn with_reachable(self, reachable: bool) -> Self {
        self.state.borrow_mut().reachable = reachable;
        self
    }

    /// Set the camera preference.
    pub fn with_camera_enabled(self, enabled: bool) -> Self {
        self.set_camera_enabled(enabled);
        self
    }

    /// Set the capability level used by [`orchestrator`](Self::orchestrator).
    pub fn with_capability(self, level: u32) -> Self {
        self.state.borrow_mut().capability = CapabilityLevel::new(level);
        self
    }

    /// Whether start commands immediately show up as running.
    ///
    /// Turning this off models a service manager that has not yet
    /// registered the service when the next check runs.
    pub fn with_starts_reflected(self, reflect: bool) -> Self {
        self.state.borrow_mut().reflect_starts = reflect;
        self
    }

    /// Change the installation state.
    pub fn set_installed(&self, installed: bool) {
        self.state.borrow_mut().installed = installed;
    }

    /// Change the camera preference.
    pub fn set_camera_enabled(&self, enabled: bool) {
        self.state.borrow_mut().camera_enabled = enabled;
    }

    /// Mark a service as running under `variant`.
    pub fn set_running(&self, service: ServiceId, variant: ServiceVariant) {
        self.state.borrow_mut().running.insert(service, variant);
    }

    /// Simulate external termination of a service.
    pub fn stop(&self, service: ServiceId) {
        self.state.borrow_mut().running.remove(&service);
    }

    /// The variant a service is running as, if running.
    pub fn running_variant(&self, service: ServiceId) -> Option<ServiceVariant> {
        self.state.borrow().running.get(&service).copied()
    }

    /// All start commands issued, in order.
    pub fn starts(&self) -> Vec<(ServiceId, ServiceVariant)> {
        self.state.borrow().starts.clone()
    }

    /// Start commands for one service.
    pub fn starts_of(&self, service: ServiceId) -> Vec<ServiceVariant> {
        self.state
            .borrow()
            .starts
            .iter()
            .filter(|(s, _)| *s == service)
            .map(|(_, v)| *v)
            .collect()
    }

    /// All permission prompts launched, in order.
    pub fn prompts(&self) -> Vec<PermissionSet> {
        self.state.borrow().prompts.clone()
    }

    /// All notices shown, in order.
    pub fn notices(&self) -> Vec<Notice> {
        self.state.borrow().notices.clone()
    }

    /// All handoffs performed, in order.
    pub fn routes(&self) -> Vec<Route> {
        self.state.borrow().routes.clone()
    }

    /// How many times reachability was queried.
    pub fn reachability_queries(&self) -> usize {
        self.state.borrow().reachability_queries
    }

    /// Build a launcher wired to this platform.
    pub fn launcher(&self) -> ServiceLauncher {
        let capability = self.state.borrow().capability;
        ServiceLauncher::new(
            Box::new(self.clone()),
            Box::new(self.clone()),
            Box::new(self.clone()),
            capability,
        )
    }

    /// Build an orchestrator wired to this platform.
    pub fn orchestrator(&self) -> StartupOrchestrator {
        StartupOrchestrator::new(
            Box::new(self.clone()),
            Box::new(self.clone()),
            PermissionGate::new(Box::new(self.clone())),
            self.launcher(),
            Box::new(self.clone()),
            Box::new(self.clone()),
        )
    }
}

impl EnvironmentProbe for MockPlatform {
    fn is_installed(&self) -> bool {
        self.state.borrow().installed
    }

    fn has_storage_permission(&self) -> bool {
        self.check_granted(&PermissionId::new(STORAGE_WRITE))
    }
}

impl PermissionPlatform for MockPlatform {
    fn check_granted(&self, permission: &PermissionId) -> bool {
        self.state
            .borrow()
            .granted
            .get(permission)
            .copied()
            .unwrap_or(false)
    }
}

impl PermissionPrompter for MockPlatform {
    fn launch(&mut self, permissions: &PermissionSet) {
        self.state.borrow_mut().prompts.push(permissions.clone());
    }
}

impl ReachabilityProbe for MockPlatform {
    fn is_reachable(&self) -> bool {
        let mut state = self.state.borrow_mut();
        state.reachability_queries += 1;
        state.reachable
    }
}

impl ServiceRegistry for MockPlatform {
    fn is_running(&self, service: ServiceId) -> bool {
        self.state.borrow().running.contains_key(&service)
    }
}

impl ServiceManager for MockPlatform {
    fn start(&mut self, service: ServiceId, variant: ServiceVariant) {
        let mut state = self.state.borrow_mut();
        state.starts.push((service, variant));
        if state.reflect_starts {
            state.running.insert(service, variant);
        }
    }
}

impl UserConfiguration for MockPlatform {
    fn camera_server_enabled(&self) -> bool {
        self.state.borrow().camera_enabled
    }
}

impl FlowRouter for MockPlatform {
    fn route_to_install_flow(&mut self) {
        self.state.borrow_mut().routes.push(Route::Install);
    }

    fn route_to_main_flow(&mut self) {
        self.state.borrow_mut().routes.push(Route::Main);
    }
}

impl NoticeSink for MockPlatform {
    fn notify(&mut self, notice: Notice) {
        self.state.borrow_mut().notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let platform = MockPlatform::new();
        let mut clone = platform.clone();
        clone.start(ServiceId::Camera, ServiceVariant::Legacy);
        assert_eq!(platform.running_variant(ServiceId::Camera), Some(ServiceVariant::Legacy));
    }

    #[test]
    fn unreflected_starts_stay_not_running() {
        let platform = MockPlatform::new().with_starts_reflected(false);
        let mut clone = platform.clone();
        clone.start(ServiceId::PrintServer, ServiceVariant::Standard);
        assert!(!platform.is_running(ServiceId::PrintServer));
        assert_eq!(platform.starts_of(ServiceId::PrintServer).len(), 1);
    }

    #[test]
    fn reachability_queries_are_counted() {
        let platform = MockPlatform::new();
        platform.is_reachable();
        platform.is_reachable();
        assert_eq!(platform.reachability_queries(), 2);
    }

    #[test]
    fn storage_permission_defaults_to_denied() {
        assert!(!MockPlatform::new().has_storage_permission());
        assert!(MockPlatform::new()
            .with_storage_granted(true)
            .has_storage_permission());
    }
}
