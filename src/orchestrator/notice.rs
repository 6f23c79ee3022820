//! User-visible notices raised on short-circuit paths.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A transient, one-shot message shown when a pass cannot proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// The install action needs network connectivity.
    MissingNetwork,
    /// The storage permission was not (fully) granted.
    MissingWritePermission,
}

impl Notice {
    /// The string key of this notice.
    pub fn key(&self) -> &'static str {
        match self {
            Notice::MissingNetwork => "missing_network",
            Notice::MissingWritePermission => "missing_write_permission",
        }
    }

    /// Default user-facing text.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::MissingNetwork => {
                "No network connection. Connect to the internet to install the runtime."
            }
            Notice::MissingWritePermission => {
                "Storage permission is required to start the print server."
            }
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Receives notices for display.
pub trait NoticeSink {
    /// Surface `notice` to the user.
    fn notify(&mut self, notice: Notice);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_keys() {
        assert_eq!(Notice::MissingNetwork.key(), "missing_network");
        assert_eq!(
            Notice::MissingWritePermission.key(),
            "missing_write_permission"
        );
    }

    #[test]
    fn serde_uses_keys() {
        let yaml = serde_yaml::to_string(&Notice::MissingWritePermission).unwrap();
        assert_eq!(yaml.trim(), "missing_write_permission");
    }

    #[test]
    fn messages_are_not_empty() {
        assert!(Notice::MissingNetwork.message().contains("network"));
        assert!(Notice::MissingWritePermission.message().contains("Storage"));
    }
}
