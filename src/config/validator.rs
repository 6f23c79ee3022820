//! Configuration validation rules.
//!
//! - A print-server command must be configured
//! - Camera commands must exist when the camera preference defaults to on
//! - The storage permission set must not be empty
//! - The reachability timeout must be positive

use crate::config::schema::StartgateConfig;
use crate::error::{Result, StartgateError};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &StartgateConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match &config.services.print_server {
        None => errors.push(ValidationError::new(
            "missing-print-server",
            "services.print_server.command is required",
        )),
        Some(cmd) if cmd.command.trim().is_empty() => errors.push(ValidationError::new(
            "empty-command",
            "services.print_server.command must not be empty",
        )),
        Some(_) => {}
    }

    let camera = &config.services.camera;
    for (name, cmd) in [("modern", &camera.modern), ("legacy", &camera.legacy)] {
        match cmd {
            Some(c) if c.command.trim().is_empty() => errors.push(ValidationError::new(
                "empty-command",
                format!("services.camera.{}.command must not be empty", name),
            )),
            None if config.settings.camera_server_enabled => errors.push(ValidationError::new(
                "missing-camera-variant",
                format!(
                    "services.camera.{} is required when camera_server_enabled is set",
                    name
                ),
            )),
            _ => {}
        }
    }

    if config.permissions.storage.is_empty() {
        errors.push(ValidationError::new(
            "empty-permissions",
            "permissions.storage must list at least one permission",
        ));
    }

    if config.network.timeout_ms == 0 {
        errors.push(ValidationError::new(
            "zero-timeout",
            "network.timeout_ms must be greater than zero",
        ));
    }

    errors
}

/// Validate and fail with a combined message on any error.
pub fn validate(config: &StartgateConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(StartgateError::ConfigValidationError { message })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> StartgateConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn minimal_valid_config() {
        let config = parse("services:\n  print_server:\n    command: serve\n");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn missing_print_server_is_reported() {
        let errors = validate_config(&parse("{}"));
        assert!(errors.iter().any(|e| e.rule == "missing-print-server"));
    }

    #[test]
    fn blank_command_is_reported() {
        let errors = validate_config(&parse("services:\n  print_server:\n    command: '  '\n"));
        assert!(errors.iter().any(|e| e.rule == "empty-command"));
    }

    #[test]
    fn camera_enabled_requires_both_variants() {
        let config = parse(
            r#"
services:
  print_server: { command: serve }
  camera:
    modern: { command: cam }
settings:
  camera_server_enabled: true
"#,
        );
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("legacy"));
    }

    #[test]
    fn camera_disabled_allows_missing_variants() {
        let config = parse("services:\n  print_server: { command: serve }\n");
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn collects_multiple_errors() {
        let config = parse("permissions:\n  storage: []\nnetwork:\n  timeout_ms: 0\n");
        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("print_server"));
        assert!(msg.contains("permissions.storage"));
        assert!(msg.contains("timeout_ms"));
    }
}
