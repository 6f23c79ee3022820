//! Environment probe.
//!
//! Answers the two questions that gate startup: is the runtime environment
//! installed, and is the storage permission granted. Both answers are read
//! from current platform state on every call.

/// Answers installation and storage-permission questions.
///
/// Implementations must be side-effect free and total.
pub trait EnvironmentProbe {
    /// Whether the runtime environment has been installed.
    fn is_installed(&self) -> bool;

    /// Whether the storage permission is currently granted.
    fn has_storage_permission(&self) -> bool;
}
