//! Permission identities, grant responses and the permission gate.
//!
//! # Modules
//!
//! - [`gate`] - Suspending permission requests with explicit continuations

pub mod gate;

pub use gate::{GrantTicket, PendingGrant, PermissionGate};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identity of a platform permission (e.g., `storage.write`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(String);

impl PermissionId {
    /// Create a permission id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PermissionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A set of permissions requested together.
pub type PermissionSet = BTreeSet<PermissionId>;

/// Permission probed before starting services.
pub const STORAGE_WRITE: &str = "storage.write";

/// Permission requested alongside [`STORAGE_WRITE`].
pub const STORAGE_READ: &str = "storage.read";

/// The default storage permission set: write and read.
pub fn storage_permissions() -> PermissionSet {
    [STORAGE_WRITE, STORAGE_READ]
        .into_iter()
        .map(PermissionId::from)
        .collect()
}

/// The user's answer to a permission prompt, per permission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantResponse {
    answers: BTreeMap<PermissionId, bool>,
}

impl GrantResponse {
    /// An empty response (nothing answered).
    pub fn new() -> Self {
        Self::default()
    }

    /// A response granting every permission in `permissions`.
    pub fn granting(permissions: &PermissionSet) -> Self {
        permissions.iter().cloned().map(|p| (p, true)).collect()
    }

    /// A response denying every permission in `permissions`.
    pub fn denying(permissions: &PermissionSet) -> Self {
        permissions.iter().cloned().map(|p| (p, false)).collect()
    }

    /// Record an answer for one permission.
    pub fn set(&mut self, permission: PermissionId, granted: bool) {
        self.answers.insert(permission, granted);
    }

    /// The answer for `permission`, if one was given.
    pub fn answer(&self, permission: &PermissionId) -> Option<bool> {
        self.answers.get(permission).copied()
    }

    /// Whether every permission in `requested` was answered and granted.
    pub fn grants_all(&self, requested: &PermissionSet) -> bool {
        requested
            .iter()
            .all(|p| self.answer(p).unwrap_or(false))
    }

    /// Iterate over the recorded answers.
    pub fn iter(&self) -> impl Iterator<Item = (&PermissionId, bool)> {
        self.answers.iter().map(|(p, g)| (p, *g))
    }
}

impl FromIterator<(PermissionId, bool)> for GrantResponse {
    fn from_iter<I: IntoIterator<Item = (PermissionId, bool)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}

/// Read access to the platform's current permission state.
pub trait PermissionPlatform {
    /// Whether `permission` is currently granted.
    fn check_granted(&self, permission: &PermissionId) -> bool;
}

/// Shows the platform permission prompt.
///
/// The answer is not returned here. It arrives later as a discrete event
/// carrying a [`GrantResponse`].
pub trait PermissionPrompter {
    /// Present a prompt for `permissions`.
    fn launch(&mut self, permissions: &PermissionSet);
}
