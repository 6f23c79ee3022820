//! Error types for startgate operations.
//!
//! This module defines [`StartgateError`], the error type used by the host
//! adapter, configuration and CLI layers, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - The orchestrator core is infallible: precondition failures are pass
//!   outcomes carrying a [`Notice`](crate::orchestrator::Notice), not errors
//! - Use `StartgateError` for host-side failures that need distinct handling
//! - Use `anyhow::Error` (via `StartgateError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for startgate host operations.
#[derive(Debug, Error)]
pub enum StartgateError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A persisted state file could not be read or written.
    #[error("State error at {path}: {message}")]
    StateError { path: PathBuf, message: String },

    /// A handoff command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for startgate operations.
pub type Result<T> = std::result::Result<T, StartgateError>;
