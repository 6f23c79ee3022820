//! State directory layout and persisted pass history.
//!
//! All host-side state lives in one directory, `<project>/.startgate/state`
//! unless `STARTGATE_STATE_DIR` points elsewhere. Files are YAML and written
//! atomically (write to a temp file, then rename).

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_DIR;
use crate::error::{Result, StartgateError};
use crate::orchestrator::{Notice, PassOutcome, Route, Trigger};
use crate::service::ServiceId;

/// Location of the host state files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    /// Environment variable overriding the state directory.
    pub const ENV_VAR: &'static str = "STARTGATE_STATE_DIR";

    /// State directory at an explicit path.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// State directory for a project, honoring [`ENV_VAR`](Self::ENV_VAR).
    pub fn for_project(project_root: &Path) -> Self {
        match std::env::var_os(Self::ENV_VAR) {
            Some(dir) if !dir.is_empty() => Self::at(dir),
            _ => Self::at(project_root.join(CONFIG_DIR).join("state")),
        }
    }

    /// The directory itself.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Permission grant table.
    pub fn grants_file(&self) -> PathBuf {
        self.root.join("grants.yml")
    }

    /// User preferences.
    pub fn preferences_file(&self) -> PathBuf {
        self.root.join("preferences.yml")
    }

    /// Pass history.
    pub fn state_file(&self) -> PathBuf {
        self.root.join("state.yml")
    }

    /// Run record of one service.
    pub fn service_record(&self, service: ServiceId) -> PathBuf {
        self.root.join("services").join(format!("{}.yml", service))
    }

    /// Output log of one service.
    pub fn service_log(&self, service: ServiceId) -> PathBuf {
        self.root.join("logs").join(format!("{}.log", service))
    }
}

/// Read a YAML file, returning `None` when it does not exist.
pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| StartgateError::StateError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Write a YAML file atomically, creating parent directories.
pub fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_yaml::to_string(value).map_err(|e| StartgateError::StateError {
        path: path.to_path_buf(),
        message: format!("Failed to serialize: {}", e),
    })?;

    let temp_path = path.with_extension("yml.tmp");
    fs::write(&temp_path, &content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Record of one finished (or suspended) orchestration pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassRecord {
    /// When the pass ended.
    pub timestamp: DateTime<Utc>,
    /// What started it.
    pub trigger: Trigger,
    /// Outcome label (see [`PassOutcome::label`]).
    pub outcome: String,
    /// Route taken, if routed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    /// Notice shown, if short-circuited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl PassRecord {
    /// Record `outcome` of a pass started by `trigger`, timestamped now.
    pub fn new(trigger: Trigger, outcome: &PassOutcome) -> Self {
        Self {
            timestamp: Utc::now(),
            trigger,
            outcome: outcome.label().to_string(),
            route: outcome.route(),
            notice: outcome.notice(),
        }
    }
}

/// Persisted pass history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateStore {
    /// Schema version for migration.
    pub version: u32,

    /// The most recent pass.
    #[serde(default)]
    pub last_pass: Option<PassRecord>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            last_pass: None,
        }
    }
}

impl StateStore {
    /// Current schema version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Load the store, or an empty one if none was saved.
    pub fn load(dir: &StateDir) -> Result<Self> {
        Ok(read_yaml(&dir.state_file())?.unwrap_or_default())
    }

    /// Save the store.
    pub fn save(&self, dir: &StateDir) -> Result<()> {
        write_yaml(&dir.state_file(), self)
    }

    /// Replace the last pass record.
    pub fn record_pass(&mut self, record: PassRecord) {
        self.last_pass = Some(record);
    }
}
