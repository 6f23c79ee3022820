//! Integration tests for the startgate binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::net::TcpListener;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".startgate");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yml"), config).unwrap();
    temp
}

fn config_with(target: &str, main_flow: &str) -> String {
    format!(
        r#"
app_name: Test Host
install:
  marker: runtime/.installed
flows:
  install:
    command: echo install-flow-started
  main:
    command: {main_flow}
network:
  targets: ["{target}"]
  timeout_ms: 500
services:
  print_server:
    command: "true"
"#
    )
}

fn simple_config() -> String {
    config_with("127.0.0.1:1", "echo main-flow-started")
}

fn mark_installed(temp: &TempDir) {
    fs::create_dir_all(temp.path().join("runtime")).unwrap();
    fs::write(temp.path().join("runtime/.installed"), "").unwrap();
}

fn grant_storage(temp: &TempDir) {
    let state = temp.path().join(".startgate/state");
    fs::create_dir_all(&state).unwrap();
    fs::write(
        state.join("grants.yml"),
        "grants:\n  storage.write: true\n  storage.read: true\n",
    )
    .unwrap();
}

fn startgate(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("startgate"));
    cmd.current_dir(temp.path());
    cmd.env_remove("STARTGATE_STATE_DIR");
    cmd.env_remove("STARTGATE_CAPABILITY_LEVEL");
    cmd.env_remove("STARTGATE_PROMPT_STORAGE_WRITE");
    cmd.env_remove("STARTGATE_PROMPT_STORAGE_READ");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("startgate"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Startup orchestration"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("startgate"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_without_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    startgate(&temp)
        .arg("launch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn launch_before_install_does_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&simple_config());
    startgate(&temp)
        .arg("launch")
        .assert()
        .success()
        .stdout(predicate::str::contains("not installed"))
        .stdout(predicate::str::contains("main-flow-started").not());
    assert!(!temp
        .path()
        .join(".startgate/state/services/print-server.yml")
        .exists());
    Ok(())
}

#[test]
fn no_subcommand_is_launch() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&simple_config());
    startgate(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("not installed"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn launch_installed_and_granted_hands_off_to_main() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&simple_config());
    mark_installed(&temp);
    grant_storage(&temp);

    startgate(&temp)
        .arg("launch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Routed to main flow"))
        .stdout(predicate::str::contains("main-flow-started"));

    assert!(temp
        .path()
        .join(".startgate/state/services/print-server.yml")
        .exists());
    let state = fs::read_to_string(temp.path().join(".startgate/state/state.yml"))?;
    assert!(state.contains("routed"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn no_handoff_skips_flow_command() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&simple_config());
    mark_installed(&temp);
    grant_storage(&temp);

    startgate(&temp)
        .args(["launch", "--no-handoff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping main flow"))
        .stdout(predicate::str::contains("main-flow-started").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn failing_handoff_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&config_with("127.0.0.1:1", "exit 7"));
    mark_installed(&temp);
    grant_storage(&temp);

    startgate(&temp)
        .arg("launch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Command failed"));
    Ok(())
}

#[test]
fn launch_without_grant_declines_in_non_interactive_mode() -> Result<(), Box<dyn std::error::Error>>
{
    let temp = setup_project(&simple_config());
    mark_installed(&temp);

    startgate(&temp)
        .args(["launch", "--non-interactive"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Storage permission is required"));

    let grants = fs::read_to_string(temp.path().join(".startgate/state/grants.yml"))?;
    assert!(grants.contains("storage.write: false"));
    Ok(())
}

#[test]
fn install_without_network_shows_notice() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&simple_config());
    startgate(&temp)
        .arg("install")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No network connection"))
        .stdout(predicate::str::contains("install-flow-started").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn install_with_network_and_env_grants_routes_install() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let target = listener.local_addr()?.to_string();
    let temp = setup_project(&config_with(&target, "echo main-flow-started"));

    startgate(&temp)
        .arg("install")
        .env("STARTGATE_PROMPT_STORAGE_WRITE", "yes")
        .env("STARTGATE_PROMPT_STORAGE_READ", "yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Routed to install flow"))
        .stdout(predicate::str::contains("install-flow-started"));
    drop(listener);
    Ok(())
}

#[test]
fn status_json_offline() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&simple_config());
    let output = startgate(&temp)
        .args(["status", "--json", "--offline"])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["installed"], false);
    assert_eq!(value["storage_granted"], false);
    assert!(value["network_reachable"].is_null());
    assert_eq!(value["services"][1]["service"], "camera");
    Ok(())
}

#[test]
fn prefs_round_trip_through_cli() -> Result<(), Box<dyn std::error::Error>> {
    let config = format!(
        "{}  camera:\n    modern:\n      command: cam\n    legacy:\n      command: cam-old\n",
        simple_config()
    );
    let temp = setup_project(&config);

    startgate(&temp)
        .args(["prefs", "--camera-server", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Camera server enabled"));

    startgate(&temp)
        .args(["status", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enabled (modern)"));
    Ok(())
}

#[test]
fn capability_env_selects_legacy_camera() -> Result<(), Box<dyn std::error::Error>> {
    let config = format!(
        "{}  camera:\n    modern:\n      command: cam\n    legacy:\n      command: cam-old\nsettings:\n  camera_server_enabled: true\n",
        simple_config()
    );
    let temp = setup_project(&config);

    startgate(&temp)
        .args(["status", "--offline"])
        .env("STARTGATE_CAPABILITY_LEVEL", "19")
        .assert()
        .success()
        .stdout(predicate::str::contains("enabled (legacy)"));
    Ok(())
}
