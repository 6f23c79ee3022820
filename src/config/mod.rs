//! Configuration loading, parsing, and validation for startgate.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, merging and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use startgate::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".startgate");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(
//!     dir.join("config.yml"),
//!     "app_name: test\nservices:\n  print_server:\n    command: serve\n",
//! )
//! .unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.app_name, Some("test".to_string()));
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    deep_merge, load_config, load_config_value, load_merged_config, parse_config, ConfigPaths,
    CONFIG_DIR,
};
pub use schema::{
    CameraConfig, FlowConfig, FlowsConfig, InstallConfig, NetworkConfig, OutputMode,
    PermissionsConfig, PlatformConfig, ServiceCommand, ServicesConfig, Settings, StartgateConfig,
};
pub use validator::{validate, validate_config, ValidationError};
