//! Startup orchestration.
//!
//! This module provides:
//! - [`StartupOrchestrator`], the state machine sequencing a startup pass
//! - [`Event`] and [`PassOutcome`], its input and output
//! - [`FlowRouter`] and [`NoticeSink`], the handoff and notice seams
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
//! assert_eq!(
//!     orchestrator.on_launch(),
//!     PassOutcome::Routed { route: Route::Main }
//! );
//! assert_eq!(platform.starts().len(), 1);
//! ```

pub mod machine;
pub mod notice;
pub mod route;
pub mod state;

pub use machine::StartupOrchestrator;
pub use notice::{Notice, NoticeSink};
pub use route::{FlowRouter, Route};
pub use state::{Event, OrchestratorState, PassOutcome, Trigger};
