//! Integration tests for config module public API.

use startgate::config::{load_merged_config, validate, OutputMode, StartgateConfig};
use startgate::permission::PermissionId;
use startgate::service::{ServiceId, ServiceVariant};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_config(root: &Path, name: &str, content: &str) {
    let dir = root.join(".startgate");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn public_api_is_accessible() {
    let config = StartgateConfig::default();
    let _mode = OutputMode::Verbose;
    assert_eq!(config.display_name(), "Print Host");
}

#[test]
fn full_config_workflow() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "config.yml",
        r#"
app_name: Shop Printer
install:
  marker: runtime/.installed
platform:
  capability_level: 26
services:
  print_server:
    command: ./bin/print-server
  camera:
    modern:
      command: ./bin/camera --modern
    legacy:
      command: ./bin/camera --legacy
    min_modern_level: 24
"#,
    );

    let config = load_merged_config(temp.path()).unwrap();
    validate(&config).unwrap();

    assert_eq!(config.display_name(), "Shop Printer");
    assert_eq!(config.platform.capability_level, Some(26));
    assert_eq!(config.services.camera.min_modern_level, 24);
    assert_eq!(
        config
            .services
            .command_for(ServiceId::Camera, ServiceVariant::Legacy),
        Some("./bin/camera --legacy")
    );
    assert_eq!(
        config.permissions.probed(),
        Some(&PermissionId::new("storage.write"))
    );
}

#[test]
fn config_merge_workflow() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "config.yml",
        r#"
app_name: BaseApp
settings:
  output: verbose
network:
  targets: ["1.1.1.1:443"]
  timeout_ms: 1500
services:
  print_server:
    command: serve
"#,
    );
    write_config(
        temp.path(),
        "config.local.yml",
        r#"
settings:
  output: quiet
network:
  targets: ["192.168.1.1:80"]
"#,
    );

    let config = load_merged_config(temp.path()).unwrap();

    assert_eq!(config.app_name, Some("BaseApp".to_string()));
    assert_eq!(config.settings.output, Some(OutputMode::Quiet));
    assert_eq!(config.network.targets, vec!["192.168.1.1:80".to_string()]);
    // Keys the overlay leaves alone survive the merge.
    assert_eq!(config.network.timeout_ms, 1500);
    assert_eq!(
        config
            .services
            .command_for(ServiceId::PrintServer, ServiceVariant::Standard),
        Some("serve")
    );
}

#[test]
fn validation_collects_all_errors() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "config.yml",
        r#"
network:
  timeout_ms: 0
settings:
  camera_server_enabled: true
"#,
    );

    let config = load_merged_config(temp.path()).unwrap();
    let err = validate(&config).unwrap_err().to_string();

    assert!(err.contains("print_server"));
    assert!(err.contains("services.camera.modern"));
    assert!(err.contains("timeout_ms"));
}

#[test]
fn missing_config_is_reported() {
    let temp = TempDir::new().unwrap();
    let err = load_merged_config(temp.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration not found"));
}

#[test]
fn invalid_yaml_is_reported() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "config.yml", "services: [unclosed");
    let err = load_merged_config(temp.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}
