//! The startup state machine.
//!
//! One orchestration pass runs from `Idle` to a routed terminal state, or
//! back to `Idle` when a precondition fails. Steps within a pass run in
//! strict order. The only suspension point is the permission prompt, held
//! as a [`PendingGrant`](crate::permission::PendingGrant) inside the state
//! until the host feeds back [`Event::PermissionResult`].
//!
//! Passes are not serialized against each other. Any trigger starts a fresh
//! pass; a permission request still pending at that moment is abandoned.

use super::{
    Event, FlowRouter, Notice, NoticeSink, OrchestratorState, PassOutcome, Route, Trigger,
};
use crate::permission::{
    storage_permissions, GrantResponse, GrantTicket, PermissionGate, PermissionSet,
};
use crate::probe::{EnvironmentProbe, ReachabilityProbe};
use crate::service::ServiceLauncher;

/// Sequences probes, the permission gate and the launcher, then routes.
pub struct StartupOrchestrator {
    environment: Box<dyn EnvironmentProbe>,
    reachability: Box<dyn ReachabilityProbe>,
    gate: PermissionGate,
    launcher: ServiceLauncher,
    router: Box<dyn FlowRouter>,
    notices: Box<dyn NoticeSink>,
    storage_permissions: PermissionSet,
    state: OrchestratorState,
}

impl StartupOrchestrator {
    /// Create an orchestrator in the `Idle` state.
    pub fn new(
        environment: Box<dyn EnvironmentProbe>,
        reachability: Box<dyn ReachabilityProbe>,
        gate: PermissionGate,
        launcher: ServiceLauncher,
        router: Box<dyn FlowRouter>,
        notices: Box<dyn NoticeSink>,
    ) -> Self {
        Self {
            environment,
            reachability,
            gate,
            launcher,
            router,
            notices,
            storage_permissions: storage_permissions(),
            state: OrchestratorState::Idle,
        }
    }

    /// Replace the permission set requested when storage access is missing.
    pub fn with_storage_permissions(mut self, permissions: PermissionSet) -> Self {
        self.storage_permissions = permissions;
        self
    }

    /// Current state.
    pub fn state(&self) -> &OrchestratorState {
        &self.state
    }

    /// Feed one event into the machine.
    pub fn handle(&mut self, event: Event) -> PassOutcome {
        match event {
            Event::Launch => self.begin_pass(Trigger::Launch),
            Event::InstallRequested => self.begin_pass(Trigger::InstallRequested),
            Event::PermissionResult { ticket, response } => self.resume(ticket, &response),
        }
    }

    /// The hosting screen launched (automatic resume path).
    pub fn on_launch(&mut self) -> PassOutcome {
        self.handle(Event::Launch)
    }

    /// The user invoked the install action.
    pub fn on_install_requested(&mut self) -> PassOutcome {
        self.handle(Event::InstallRequested)
    }

    /// The user answered the permission prompt identified by `ticket`.
    pub fn on_permission_result(
        &mut self,
        ticket: GrantTicket,
        response: GrantResponse,
    ) -> PassOutcome {
        self.handle(Event::PermissionResult { ticket, response })
    }

    fn begin_pass(&mut self, trigger: Trigger) -> PassOutcome {
        if let OrchestratorState::PermissionRequestPending(pending) = &self.state {
            tracing::debug!(
                "Abandoning permission request {} for new {} pass",
                pending.ticket(),
                trigger
            );
        }
        self.state = OrchestratorState::Idle;
        tracing::debug!("Starting {} pass", trigger);

        match trigger {
            // The automatic path only runs over an existing installation.
            Trigger::Launch => {
                if !self.environment.is_installed() {
                    tracing::debug!("Not installed, waiting for install action");
                    return PassOutcome::NotInstalled;
                }
            }
            Trigger::InstallRequested => {
                if !self.reachability.is_reachable() {
                    return self.short_circuit(Notice::MissingNetwork);
                }
            }
        }

        self.transition(OrchestratorState::PermissionCheck);
        if self.environment.has_storage_permission() {
            return self.start_and_route();
        }

        let pending = self.gate.request(self.storage_permissions.clone());
        let ticket = pending.ticket();
        self.transition(OrchestratorState::PermissionRequestPending(pending));
        PassOutcome::AwaitingPermission { ticket }
    }

    fn resume(&mut self, ticket: GrantTicket, response: &GrantResponse) -> PassOutcome {
        let pending = match std::mem::replace(&mut self.state, OrchestratorState::Idle) {
            OrchestratorState::PermissionRequestPending(pending) if pending.ticket() == ticket => {
                pending
            }
            other => {
                tracing::debug!("Ignoring permission result {} in state {}", ticket, other);
                self.state = other;
                return PassOutcome::Ignored;
            }
        };

        if !pending.resolve(response) {
            return self.short_circuit(Notice::MissingWritePermission);
        }
        self.start_and_route()
    }

    fn start_and_route(&mut self) -> PassOutcome {
        self.transition(OrchestratorState::ServiceStart);
        self.launcher.start_configured_services();

        self.transition(OrchestratorState::RouteDecision);
        if self.environment.is_installed() {
            self.transition(OrchestratorState::RoutedToMain);
            self.router.route_to_main_flow();
            PassOutcome::Routed { route: Route::Main }
        } else {
            self.transition(OrchestratorState::RoutedToInstall);
            self.router.route_to_install_flow();
            PassOutcome::Routed {
                route: Route::Install,
            }
        }
    }

    fn short_circuit(&mut self, notice: Notice) -> PassOutcome {
        self.transition(OrchestratorState::Idle);
        tracing::info!("Startup halted: {}", notice);
        self.notices.notify(notice);
        PassOutcome::ShortCircuited { notice }
    }

    fn transition(&mut self, next: OrchestratorState) {
        tracing::debug!("{} -> {}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPlatform;
    use crate::service::{ServiceId, ServiceVariant};

    #[test]
    fn starts_idle() {
        let orchestrator = MockPlatform::new().orchestrator();
        assert_eq!(orchestrator.state(), &OrchestratorState::Idle);
    }

    #[test]
    fn launch_without_installation_stays_idle() {
        let platform = MockPlatform::new().with_storage_granted(true);
        let mut orchestrator = platform.orchestrator();

        assert_eq!(orchestrator.on_launch(), PassOutcome::NotInstalled);
        assert_eq!(orchestrator.state(), &OrchestratorState::Idle);
        assert!(platform.starts().is_empty());
        assert!(platform.notices().is_empty());
    }

    #[test]
    fn launch_never_queries_reachability() {
        let platform = MockPlatform::new()
            .with_installed(true)
            .with_storage_granted(true);
        let mut orchestrator = platform.orchestrator();

        orchestrator.on_launch();

        assert_eq!(platform.reachability_queries(), 0);
    }

    #[test]
    fn pending_state_holds_ticket() {
        let platform = MockPlatform::new().with_reachable(true);
        let mut orchestrator = platform.orchestrator();

        let PassOutcome::AwaitingPermission { ticket } = orchestrator.on_install_requested() else {
            panic!("expected suspension");
        };
        match orchestrator.state() {
            OrchestratorState::PermissionRequestPending(pending) => {
                assert_eq!(pending.ticket(), ticket)
            }
            other => panic!("unexpected state {other}"),
        }
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let platform = MockPlatform::new().with_reachable(true);
        let mut orchestrator = platform.orchestrator();

        let PassOutcome::AwaitingPermission { ticket: first } = orchestrator.on_install_requested()
        else {
            panic!("expected suspension");
        };
        let PassOutcome::AwaitingPermission { ticket: second } =
            orchestrator.on_install_requested()
        else {
            panic!("expected suspension");
        };

        let grant = GrantResponse::granting(&storage_permissions());
        assert_eq!(
            orchestrator.on_permission_result(first, grant.clone()),
            PassOutcome::Ignored
        );
        assert!(platform.starts().is_empty());

        assert!(orchestrator.on_permission_result(second, grant).is_routed());
    }

    #[test]
    fn result_without_pending_request_is_ignored() {
        let platform = MockPlatform::new()
            .with_installed(true)
            .with_storage_granted(true)
            .with_reachable(true);
        let mut orchestrator = platform.orchestrator();
        orchestrator.on_launch();

        let orphan = MockPlatform::new().with_reachable(true);
        let mut other = orphan.orchestrator();
        let PassOutcome::AwaitingPermission { ticket } = other.on_install_requested() else {
            panic!("expected suspension");
        };

        let outcome = orchestrator
            .on_permission_result(ticket, GrantResponse::granting(&storage_permissions()));
        assert_eq!(outcome, PassOutcome::Ignored);
        assert_eq!(orchestrator.state(), &OrchestratorState::RoutedToMain);
    }

    #[test]
    fn custom_permission_set_is_requested() {
        let platform = MockPlatform::new().with_reachable(true);
        let set: PermissionSet = ["media.write"].into_iter().map(Into::into).collect();
        let mut orchestrator = platform
            .orchestrator()
            .with_storage_permissions(set.clone());

        orchestrator.on_install_requested();

        assert_eq!(platform.prompts(), vec![set]);
    }

    #[test]
    fn routed_machine_accepts_new_pass() {
        let platform = MockPlatform::new()
            .with_installed(true)
            .with_storage_granted(true);
        let mut orchestrator = platform.orchestrator();

        assert!(orchestrator.on_launch().is_routed());
        platform.stop(ServiceId::PrintServer);
        assert!(orchestrator.on_launch().is_routed());

        assert_eq!(
            platform.starts(),
            vec![
                (ServiceId::PrintServer, ServiceVariant::Standard),
                (ServiceId::PrintServer, ServiceVariant::Standard),
            ]
        );
    }
}
