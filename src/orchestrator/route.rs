//! Follow-up flow handoff.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The follow-up flow a pass hands off to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// First-time installation of the runtime environment.
    Install,
    /// Normal operation.
    Main,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Install => f.write_str("install"),
            Route::Main => f.write_str("main"),
        }
    }
}

/// Transfers control to a follow-up flow.
///
/// Each call ends the current orchestration pass.
pub trait FlowRouter {
    /// Hand off to the installation flow.
    fn route_to_install_flow(&mut self);

    /// Hand off to the normal-operation flow.
    fn route_to_main_flow(&mut self);
}
