//! Platform seams for service run state, start commands and user configuration.
//!
//! These traits are the boundary to the platform's service manager and the
//! preference store. Implementations own the actual run-state transitions;
//! the launcher only ever reads run state and issues start commands.

use super::{ServiceId, ServiceVariant};

/// Answers whether a service is currently running.
///
/// A pure read over the live-service table. Identity is logical: a service
/// running under any variant reports `true`.
pub trait ServiceRegistry {
    /// Whether `service` is running right now.
    fn is_running(&self, service: ServiceId) -> bool;
}

/// Issues start commands to the platform's service manager.
///
/// Starts are fire-and-forget. There is no failure channel back to the
/// caller; implementations surface problems through their own logging.
pub trait ServiceManager {
    /// Start `service` as `variant`.
    fn start(&mut self, service: ServiceId, variant: ServiceVariant);
}

/// Read-only view of durable user configuration.
pub trait UserConfiguration {
    /// Whether the user enabled the camera server.
    fn camera_server_enabled(&self) -> bool;
}
