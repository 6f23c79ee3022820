//! User preferences persistence.
//!
//! The camera preference starts out as the config default and becomes the
//! user's own choice once saved. It is re-read from disk on every query so a
//! change made by another process is picked up by the next pass.

use serde::{Deserialize, Serialize};

use super::store::{read_yaml, write_yaml, StateDir};
use crate::service::UserConfiguration;

/// Saved user preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether the camera server should run; unset means the config default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_server_enabled: Option<bool>,
}

impl Preferences {
    /// Load preferences, or empty ones if none were saved.
    pub fn load(dir: &StateDir) -> crate::error::Result<Self> {
        Ok(read_yaml(&dir.preferences_file())?.unwrap_or_default())
    }

    /// Save preferences atomically.
    pub fn save(&self, dir: &StateDir) -> crate::error::Result<()> {
        write_yaml(&dir.preferences_file(), self)
    }
}

/// [`UserConfiguration`] backed by the preferences file.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    dir: StateDir,
    camera_default: bool,
}

impl PreferenceStore {
    /// Read preferences from `dir`, falling back to `camera_default`.
    pub fn new(dir: StateDir, camera_default: bool) -> Self {
        Self {
            dir,
            camera_default,
        }
    }
}

impl UserConfiguration for PreferenceStore {
    fn camera_server_enabled(&self) -> bool {
        match Preferences::load(&self.dir) {
            Ok(prefs) => prefs.camera_server_enabled.unwrap_or(self.camera_default),
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences: {}", e);
                self.camera_default
            }
        }
    }
}
