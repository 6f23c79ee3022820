//! Orchestrator states, events and pass outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Notice, Route};
use crate::permission::{GrantResponse, GrantTicket, PendingGrant};

/// What started an orchestration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Automatic resume-on-launch; only proceeds when already installed.
    Launch,
    /// The user explicitly asked to proceed with installation.
    InstallRequested,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Launch => f.write_str("launch"),
            Trigger::InstallRequested => f.write_str("install"),
        }
    }
}

/// A discrete event fed into the state machine by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The hosting screen was launched.
    Launch,
    /// The install action was invoked.
    InstallRequested,
    /// The user answered a permission prompt.
    PermissionResult {
        /// Ticket of the request being answered.
        ticket: GrantTicket,
        /// Per-permission answers.
        response: GrantResponse,
    },
}

impl From<Trigger> for Event {
    fn from(trigger: Trigger) -> Self {
        match trigger {
            Trigger::Launch => Event::Launch,
            Trigger::InstallRequested => Event::InstallRequested,
        }
    }
}

/// State of the startup state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorState {
    Idle,
    PermissionCheck,
    /// Suspended until the user answers the permission prompt.
    PermissionRequestPending(PendingGrant),
    ServiceStart,
    RouteDecision,
    RoutedToInstall,
    RoutedToMain,
}

impl OrchestratorState {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            OrchestratorState::Idle => "Idle",
            OrchestratorState::PermissionCheck => "PermissionCheck",
            OrchestratorState::PermissionRequestPending(_) => "PermissionRequestPending",
            OrchestratorState::ServiceStart => "ServiceStart",
            OrchestratorState::RouteDecision => "RouteDecision",
            OrchestratorState::RoutedToInstall => "RoutedToInstall",
            OrchestratorState::RoutedToMain => "RoutedToMain",
        }
    }

    /// Whether this state ends a pass with a handoff.
    pub fn is_routed(&self) -> bool {
        matches!(
            self,
            OrchestratorState::RoutedToInstall | OrchestratorState::RoutedToMain
        )
    }
}

impl fmt::Display for OrchestratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of feeding one event into the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The pass handed off to a follow-up flow.
    Routed { route: Route },
    /// The pass is suspended on a permission prompt.
    AwaitingPermission { ticket: GrantTicket },
    /// A precondition failed; the machine is back in `Idle`.
    ShortCircuited { notice: Notice },
    /// Launched without an installation; waiting for the install action.
    NotInstalled,
    /// The event did not belong to the current pass.
    Ignored,
}

impl PassOutcome {
    /// Short label for records and logs.
    pub fn label(&self) -> &'static str {
        match self {
            PassOutcome::Routed { .. } => "routed",
            PassOutcome::AwaitingPermission { .. } => "awaiting_permission",
            PassOutcome::ShortCircuited { .. } => "short_circuited",
            PassOutcome::NotInstalled => "not_installed",
            PassOutcome::Ignored => "ignored",
        }
    }

    /// Whether the pass ended in a handoff.
    pub fn is_routed(&self) -> bool {
        matches!(self, PassOutcome::Routed { .. })
    }

    /// The route taken, if any.
    pub fn route(&self) -> Option<Route> {
        match self {
            PassOutcome::Routed { route } => Some(*route),
            _ => None,
        }
    }

    /// The notice raised, if any.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            PassOutcome::ShortCircuited { notice } => Some(*notice),
            _ => None,
        }
    }
}
