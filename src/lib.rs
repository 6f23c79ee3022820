//! Startgate - Startup orchestration for a print host.
//!
//! Startgate decides, every time the host application comes up or the user
//! asks to install, whether the runtime environment is ready. It gates
//! service starts on installation, storage permission and (for installs)
//! network reachability, starts the print and camera servers without
//! duplicating running ones, and routes to the install or main flow.
//!
//! # Modules
//!
//! - [`orchestrator`] - The startup state machine, events and routing
//! - [`service`] - Service identity, idempotent starts, camera variant choice
//! - [`permission`] - Permission sets, grant responses and the prompt gate
//! - [`probe`] - Installation, permission and network probes
//! - [`host`] - Real platform adapters (marker file, pid records, TCP)
//! - [`state`] - Grants, preferences and pass history on disk
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`cli`] - Command-line interface and argument parsing
//! - [`shell`] - Shell command execution
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`mock`] - In-memory platform for tests and examples
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use startgate::mock::MockPlatform;
//! use startgate::orchestrator::{PassOutcome, Route};
//!
//! let platform = MockPlatform::new()
//!     .with_installed(true)
//!     .with_storage_granted(true);
//! let mut orchestrator = platform.orchestrator();
//!
//! assert_eq!(orchestrator.on_launch(), PassOutcome::Routed { route: Route::Main });
//! assert_eq!(platform.starts().len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod mock;
pub mod orchestrator;
pub mod permission;
pub mod probe;
pub mod service;
pub mod shell;
pub mod state;
pub mod ui;

pub use error::{Result, StartgateError};
