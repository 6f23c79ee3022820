//! Service processes on the host.
//!
//! Each started service leaves a run record under `services/` in the state
//! directory. A service is running when its record exists and the recorded
//! process is alive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ServicesConfig;
use crate::service::{ServiceId, ServiceManager, ServiceRegistry, ServiceVariant};
use crate::shell::{spawn_detached, CommandOptions};
use crate::state::{read_yaml, write_yaml, StateDir};

/// Run record of a started service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub pid: u32,
    pub variant: ServiceVariant,
    pub command: String,
    pub started_at: DateTime<Utc>,
}

/// Whether process `pid` exists.
///
/// On non-unix targets there is no cheap check and the record alone counts.
pub fn is_pid_alive(pid: u32) -> bool {
    if pid == 0 {
        return false;
    }
    let Ok(pid_i32) = i32::try_from(pid) else {
        return false;
    };
    #[cfg(unix)]
    {
        // SAFETY: signal 0 performs only the existence and permission check.
        let result = unsafe { libc::kill(pid_i32, 0) };
        if result == 0 {
            return true;
        }
        let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
        errno == libc::EPERM
    }
    #[cfg(not(unix))]
    {
        let _ = pid_i32;
        true
    }
}

/// [`ServiceRegistry`] over the run records.
#[derive(Debug, Clone)]
pub struct PidFileRegistry {
    dir: StateDir,
}

impl PidFileRegistry {
    pub fn new(dir: StateDir) -> Self {
        Self { dir }
    }

    /// The live run record of `service`, if any.
    pub fn running(&self, service: ServiceId) -> Option<ServiceRecord> {
        let path = self.dir.service_record(service);
        match read_yaml::<ServiceRecord>(&path) {
            Ok(Some(record)) if is_pid_alive(record.pid) => Some(record),
            Ok(Some(record)) => {
                tracing::debug!("{} record is stale (pid {})", service, record.pid);
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable run record for {}: {}", service, e);
                None
            }
        }
    }
}

impl ServiceRegistry for PidFileRegistry {
    fn is_running(&self, service: ServiceId) -> bool {
        self.running(service).is_some()
    }
}

/// [`ServiceManager`] that spawns the configured commands in the background.
///
/// Start commands are fire-and-forget: failures are logged and nothing is
/// reported back to the caller.
#[derive(Debug, Clone)]
pub struct ProcessServiceManager {
    dir: StateDir,
    services: ServicesConfig,
    cwd: PathBuf,
}

impl ProcessServiceManager {
    /// Run commands from `services` in `cwd`, recording them under `dir`.
    pub fn new(dir: StateDir, services: ServicesConfig, cwd: PathBuf) -> Self {
        Self { dir, services, cwd }
    }

    fn spawn(&self, service: ServiceId, variant: ServiceVariant) -> crate::error::Result<()> {
        let Some(command) = self.services.command_for(service, variant) else {
            tracing::warn!("No command configured for {} ({})", service, variant);
            return Ok(());
        };

        let mut options = CommandOptions {
            cwd: Some(self.cwd.clone()),
            ..Default::default()
        };
        options
            .env
            .insert("STARTGATE_SERVICE".to_string(), service.to_string());
        options
            .env
            .insert("STARTGATE_VARIANT".to_string(), variant.to_string());
        let pid = spawn_detached(command, &options, &self.dir.service_log(service))?;

        let record = ServiceRecord {
            pid,
            variant,
            command: command.to_string(),
            started_at: Utc::now(),
        };
        write_yaml(&self.dir.service_record(service), &record)?;
        tracing::debug!("{} spawned with pid {}", service, pid);
        Ok(())
    }
}

impl ServiceManager for ProcessServiceManager {
    fn start(&mut self, service: ServiceId, variant: ServiceVariant) {
        if let Err(e) = self.spawn(service, variant) {
            tracing::warn!("Failed to start {} ({}): {}", service, variant, e);
        }
    }
}

/// Send SIGTERM to the process group a detached service leads.
#[cfg(all(test, unix))]
pub(crate) fn terminate(pid: u32) {
    // SAFETY: kill only sends a signal; a negative pid targets the group
    // created by `spawn_detached`.
    unsafe {
        libc::kill(-(pid as i32), libc::SIGTERM);
    }
}

/// Poll until `service` is reported as not running, up to five seconds.
#[cfg(all(test, unix))]
pub(crate) fn wait_until_stopped(registry: &PidFileRegistry, service: ServiceId) -> bool {
    for _ in 0..100 {
        if !registry.is_running(service) {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    false
}
