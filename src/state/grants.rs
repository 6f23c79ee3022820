//! Persisted permission grants.
//!
//! The grant table records the user's answers to permission prompts. Only
//! an explicit answer changes it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::store::{read_yaml, write_yaml, StateDir};
use crate::error::Result;
use crate::permission::{GrantResponse, PermissionId, PermissionPlatform};

/// Granted/denied state per permission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantTable {
    #[serde(default)]
    pub grants: BTreeMap<PermissionId, bool>,
}

impl GrantTable {
    /// Load the table, or an empty one.
    pub fn load(dir: &StateDir) -> Result<Self> {
        Ok(read_yaml(&dir.grants_file())?.unwrap_or_default())
    }

    /// Save the table atomically.
    pub fn save(&self, dir: &StateDir) -> Result<()> {
        write_yaml(&dir.grants_file(), self)
    }

    /// Whether `permission` is granted.
    pub fn is_granted(&self, permission: &PermissionId) -> bool {
        self.grants.get(permission).copied().unwrap_or(false)
    }

    /// Apply every answer in `response`.
    pub fn apply(&mut self, response: &GrantResponse) {
        for (permission, granted) in response.iter() {
            self.grants.insert(permission.clone(), granted);
        }
    }
}

/// [`PermissionPlatform`] backed by the grant table on disk.
#[derive(Debug, Clone)]
pub struct FileGrants {
    dir: StateDir,
}

impl FileGrants {
    /// Read grants from `dir`.
    pub fn new(dir: StateDir) -> Self {
        Self { dir }
    }

    /// Persist the user's answers.
    pub fn record(&self, response: &GrantResponse) -> Result<()> {
        let mut table = GrantTable::load(&self.dir)?;
        table.apply(response);
        table.save(&self.dir)
    }
}

impl PermissionPlatform for FileGrants {
    fn check_granted(&self, permission: &PermissionId) -> bool {
        match GrantTable::load(&self.dir) {
            Ok(table) => table.is_granted(permission),
            Err(e) => {
                tracing::warn!("Treating unreadable grant table as not granted: {}", e);
                false
            }
        }
    }
}
