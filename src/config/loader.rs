//! Configuration file discovery and loading.
//!
//! Config lives under `.startgate/` in the project root:
//! 1. `.startgate/config.yml` (required)
//! 2. `.startgate/config.local.yml` (optional, machine-specific overrides)
//!
//! The local file is deep-merged over the base as raw YAML before the
//! result is deserialized into [`StartgateConfig`].

use crate::config::schema::StartgateConfig;
use crate::error::{Result, StartgateError};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding config and state, relative to the project root.
pub const CONFIG_DIR: &str = ".startgate";

/// Paths to the config files of a project.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// `.startgate/config.yml`
    pub project: PathBuf,

    /// `.startgate/config.local.yml`, if present
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Locate config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let dir = project_root.join(CONFIG_DIR);
        let local = dir.join("config.local.yml");
        Self {
            project: dir.join("config.yml"),
            project_local: local.exists().then_some(local),
        }
    }
}

/// Overlay `overlay` onto `base`.
///
/// Mappings merge key by key; any other overlay value replaces the base
/// value. A null in the overlay removes the key.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in overlay_map {
                if value.is_null() {
                    merged.remove(key);
                    continue;
                }
                let next = match base_map.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Mapping(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Read one config file as raw YAML.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist and
/// `ConfigParseError` if the YAML is invalid.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StartgateError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StartgateError::Io(e)
        }
    })?;

    let value: Value =
        serde_yaml::from_str(&content).map_err(|e| StartgateError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    // An empty file parses as null; treat it as an empty mapping.
    Ok(if value.is_null() {
        Value::Mapping(Default::default())
    } else {
        value
    })
}

/// Parse YAML content into a config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<StartgateConfig> {
    serde_yaml::from_str(content).map_err(|e| StartgateError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the project config merged with local overrides.
pub fn load_merged_config(project_root: &Path) -> Result<StartgateConfig> {
    let paths = ConfigPaths::discover(project_root);

    let mut merged = load_config_value(&paths.project)?;
    if let Some(local) = &paths.project_local {
        merged = deep_merge(&merged, &load_config_value(local)?);
    }

    serde_yaml::from_value(merged).map_err(|e| StartgateError::ConfigParseError {
        path: paths.project.clone(),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config, honoring an explicit `--config` path.
///
/// An explicit path is loaded on its own, without local overrides.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<StartgateConfig> {
    match config_override {
        Some(path) => {
            let value = load_config_value(path)?;
            serde_yaml::from_value(value).map_err(|e| StartgateError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
        None => load_merged_config(project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    fn write_config(root: &Path, name: &str, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn merge_overrides_scalars_and_keeps_siblings() {
        let base = yaml("network:\n  timeout_ms: 2000\n  targets: [a]\n");
        let overlay = yaml("network:\n  timeout_ms: 100\n");
        let merged = deep_merge(&base, &overlay);
        assert_eq!(merged["network"]["timeout_ms"], 100);
        assert_eq!(merged["network"]["targets"][0], "a");
    }

    #[test]
    fn merge_replaces_sequences() {
        let base = yaml("targets: [a, b]");
        let overlay = yaml("targets: [c]");
        let merged = deep_merge(&base, &overlay);
        assert_eq!(merged["targets"].as_sequence().unwrap().len(), 1);
    }

    #[test]
    fn merge_null_removes_key() {
        let base = yaml("app_name: x\nflows:\n  main:\n    command: run");
        let overlay = yaml("flows:\n  main: ~");
        let merged = deep_merge(&base, &overlay);
        assert!(merged["flows"].get("main").is_none());
        assert_eq!(merged["app_name"], "x");
    }

    #[test]
    fn missing_project_config_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_merged_config(temp.path()).unwrap_err();
        assert!(matches!(err, StartgateError::ConfigNotFound { .. }));
    }

    #[test]
    fn empty_config_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "");
        let config = load_merged_config(temp.path()).unwrap();
        assert!(config.app_name.is_none());
    }

    #[test]
    fn local_overrides_apply() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "config.yml",
            "app_name: Base\nsettings:\n  camera_server_enabled: false\n",
        );
        write_config(
            temp.path(),
            "config.local.yml",
            "settings:\n  camera_server_enabled: true\n",
        );

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.app_name.as_deref(), Some("Base"));
        assert!(config.settings.camera_server_enabled);
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "app_name: [unclosed");
        let err = load_merged_config(temp.path()).unwrap_err();
        assert!(matches!(err, StartgateError::ConfigParseError { .. }));
    }

    #[test]
    fn explicit_path_skips_local_overrides() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.local.yml", "app_name: Local\n");
        let explicit = temp.path().join("other.yml");
        fs::write(&explicit, "app_name: Explicit\n").unwrap();

        let config = load_config(temp.path(), Some(&explicit)).unwrap();
        assert_eq!(config.app_name.as_deref(), Some("Explicit"));
    }
}
