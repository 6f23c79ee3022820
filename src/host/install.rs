//! Installation and storage-permission probing against the host.

use std::path::{Path, PathBuf};

use crate::permission::{PermissionId, PermissionPlatform};
use crate::probe::EnvironmentProbe;
use crate::state::FileGrants;

/// Installation state read from a marker file.
///
/// The install flow creates the marker when it finishes. Startgate only
/// reads it.
#[derive(Debug, Clone)]
pub struct MarkerInstallation {
    marker: PathBuf,
}

impl MarkerInstallation {
    /// Resolve `marker` against `project_root` unless it is absolute.
    pub fn new(project_root: &Path, marker: &Path) -> Self {
        Self {
            marker: project_root.join(marker),
        }
    }

    /// The marker file path.
    pub fn marker(&self) -> &Path {
        &self.marker
    }

    /// Whether the marker exists.
    pub fn is_installed(&self) -> bool {
        self.marker.is_file()
    }
}

/// [`EnvironmentProbe`] over the marker file and the grant table.
#[derive(Debug, Clone)]
pub struct HostEnvironment {
    installation: MarkerInstallation,
    grants: FileGrants,
    probed: PermissionId,
}

impl HostEnvironment {
    /// Probe `installation`, and `probed` in the grant table for storage access.
    pub fn new(installation: MarkerInstallation, grants: FileGrants, probed: PermissionId) -> Self {
        Self {
            installation,
            grants,
            probed,
        }
    }
}

impl EnvironmentProbe for HostEnvironment {
    fn is_installed(&self) -> bool {
        self.installation.is_installed()
    }

    fn has_storage_permission(&self) -> bool {
        self.grants.check_granted(&self.probed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::{storage_permissions, GrantResponse};
    use crate::state::StateDir;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn marker_decides_installation() {
        let temp = TempDir::new().unwrap();
        let install = MarkerInstallation::new(temp.path(), Path::new("runtime/.installed"));
        assert!(!install.is_installed());

        fs::create_dir_all(temp.path().join("runtime")).unwrap();
        fs::write(install.marker(), "").unwrap();
        assert!(install.is_installed());
    }

    #[test]
    fn absolute_marker_is_kept() {
        let temp = TempDir::new().unwrap();
        let abs = temp.path().join("elsewhere");
        let install = MarkerInstallation::new(Path::new("/project"), &abs);
        assert_eq!(install.marker(), abs.as_path());
    }

    #[test]
    fn storage_permission_reads_grants() {
        let temp = TempDir::new().unwrap();
        let grants = FileGrants::new(StateDir::at(temp.path().join("state")));
        let env = HostEnvironment::new(
            MarkerInstallation::new(temp.path(), Path::new(".installed")),
            grants.clone(),
            PermissionId::new("storage.write"),
        );
        assert!(!env.has_storage_permission());

        grants
            .record(&GrantResponse::granting(&storage_permissions()))
            .unwrap();
        assert!(env.has_storage_permission());
    }
}
