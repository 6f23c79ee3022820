//! The permission gate.
//!
//! Requesting permissions suspends the orchestration flow. The suspension is
//! an explicit continuation: [`PermissionGate::request`] launches the prompt
//! and returns a [`PendingGrant`], which the caller holds until the user's
//! answer arrives and then resolves. Nothing blocks. A continuation that is
//! dropped is simply never resumed.

use super::{GrantResponse, PermissionPrompter, PermissionSet};
use std::fmt;

/// Identifies one permission request, so late answers can be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrantTicket(u64);

impl GrantTicket {
    /// The raw ticket number.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GrantTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A suspended permission request awaiting the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGrant {
    ticket: GrantTicket,
    permissions: PermissionSet,
}

impl PendingGrant {
    /// The ticket answers must carry to resume this request.
    pub fn ticket(&self) -> GrantTicket {
        self.ticket
    }

    /// The permissions that were requested.
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Resume with the user's answer.
    ///
    /// All-or-nothing: `true` only if every requested permission was granted.
    pub fn resolve(self, response: &GrantResponse) -> bool {
        let granted = response.grants_all(&self.permissions);
        if !granted {
            tracing::debug!("Permission request {} not fully granted", self.ticket);
        }
        granted
    }
}

/// Requests permission sets from the platform.
pub struct PermissionGate {
    prompter: Box<dyn PermissionPrompter>,
    next_ticket: u64,
}

impl PermissionGate {
    /// Create a gate over the platform prompt.
    pub fn new(prompter: Box<dyn PermissionPrompter>) -> Self {
        Self {
            prompter,
            next_ticket: 1,
        }
    }

    /// Launch a prompt for `permissions` and return the suspended request.
    ///
    /// No retry is ever scheduled; a denied request stays denied until the
    /// user triggers the gating action again.
    pub fn request(&mut self, permissions: PermissionSet) -> PendingGrant {
        let ticket = GrantTicket(self.next_ticket);
        self.next_ticket += 1;
        tracing::debug!(
            "Requesting permissions {} ({} total)",
            ticket,
            permissions.len()
        );
        self.prompter.launch(&permissions);
        PendingGrant {
            ticket,
            permissions,
        }
    }
}
