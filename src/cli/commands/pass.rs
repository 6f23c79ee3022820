//! The `launch` and `install` commands.
//!
//! Both run one orchestration pass. The pass suspends while a permission
//! prompt is out; this command asks the user, persists the answers and
//! feeds them back until the pass ends. A route hands off to the
//! configured flow command.

use std::path::{Path, PathBuf};

use crate::cli::args::PassArgs;
use crate::error::Result;
use crate::host::Host;
use crate::orchestrator::{Event, PassOutcome, Route, StartupOrchestrator, Trigger};
use crate::permission::GrantResponse;
use crate::service::ServiceId;
use crate::shell::execute_inherited;
use crate::state::{PassRecord, StateStore};
use crate::ui::{NonInteractiveUI, Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::{apply_output_setting, load_validated};

/// One orchestration pass started by `trigger`.
pub struct PassCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    trigger: Trigger,
    args: PassArgs,
}

impl PassCommand {
    pub fn new(project_root: &Path, trigger: Trigger, args: PassArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: None,
            trigger,
            args,
        }
    }

    pub fn with_config_override(mut self, path: Option<PathBuf>) -> Self {
        self.config_override = path;
        self
    }
}

/// Drive one pass to completion, answering permission prompts through `ui`.
pub fn run_pass(host: &Host, trigger: Trigger, ui: &mut dyn UserInterface) -> Result<PassOutcome> {
    let mut orchestrator = host.orchestrator();

    let mut outcome = if trigger == Trigger::InstallRequested {
        let mut spinner = ui.start_spinner("Checking network connection...");
        let outcome = orchestrator.handle(Event::from(trigger));
        if matches!(outcome, PassOutcome::ShortCircuited { .. }) {
            spinner.finish_error("Network unreachable");
        } else {
            spinner.finish_success("Network reachable");
        }
        outcome
    } else {
        orchestrator.handle(Event::from(trigger))
    };

    while let PassOutcome::AwaitingPermission { ticket } = outcome {
        outcome = answer_prompt(host, &mut orchestrator, ticket, ui)?;
    }

    for notice in host.outbox().take_notices() {
        ui.warning(notice.message());
    }

    let mut store = StateStore::load(host.state_dir()).unwrap_or_default();
    store.record_pass(PassRecord::new(trigger, &outcome));
    if let Err(e) = store.save(host.state_dir()) {
        tracing::warn!("Failed to record pass: {}", e);
    }

    Ok(outcome)
}

fn answer_prompt(
    host: &Host,
    orchestrator: &mut StartupOrchestrator,
    ticket: crate::permission::GrantTicket,
    ui: &mut dyn UserInterface,
) -> Result<PassOutcome> {
    let requested = host
        .outbox()
        .take_prompt()
        .unwrap_or_else(|| host.config().permissions.requested());

    let mut response = GrantResponse::new();
    for permission in &requested {
        let granted = ui.confirm(&Prompt::permission(permission))?;
        response.set(permission.clone(), granted);
    }
    host.grants().record(&response)?;
    tracing::debug!("Permission answers recorded for ticket {}", ticket);

    Ok(orchestrator.on_permission_result(ticket, response))
}

impl PassCommand {
    fn handoff(&self, host: &Host, route: Route, ui: &mut dyn UserInterface) -> Result<()> {
        let flow = match route {
            Route::Install => host.config().flows.install.as_ref(),
            Route::Main => host.config().flows.main.as_ref(),
        };
        let Some(flow) = flow else {
            tracing::debug!("No {} flow command configured", route);
            return Ok(());
        };
        if self.args.no_handoff {
            ui.message(&format!("Skipping {} flow: {}", route, flow.command));
            return Ok(());
        }
        tracing::info!("Handing off to {} flow", route);
        execute_inherited(&flow.command, Some(host.project_root()))
    }

    fn show_services(&self, host: &Host, ui: &mut dyn UserInterface) {
        if !ui.output_mode().shows_detail() {
            return;
        }
        let registry = host.registry();
        for service in ServiceId::ALL {
            match registry.running(service) {
                Some(record) => ui.message(&format!(
                    "  {} running ({}, pid {})",
                    service, record.variant, record.pid
                )),
                None => ui.message(&format!("  {} not running", service)),
            }
        }
    }
}

impl Command for PassCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_validated(&self.project_root, self.config_override.as_ref())?;
        apply_output_setting(&config, ui);
        let host = Host::new(&self.project_root, config);
        ui.show_header(host.config().display_name());

        let outcome = if self.args.non_interactive && ui.is_interactive() {
            let mut headless = NonInteractiveUI::new(ui.output_mode());
            run_pass(&host, self.trigger, &mut headless)?
        } else {
            run_pass(&host, self.trigger, ui)?
        };

        match outcome {
            PassOutcome::Routed { route } => {
                if route == Route::Main {
                    self.show_services(&host, ui);
                }
                ui.success(&format!("Routed to {} flow", route));
                if let Some(route) = host.outbox().take_route() {
                    self.handoff(&host, route, ui)?;
                }
                Ok(CommandResult::success())
            }
            PassOutcome::NotInstalled => {
                ui.message("Runtime not installed. Run `startgate install` to set it up.");
                Ok(CommandResult::success())
            }
            PassOutcome::ShortCircuited { .. } => Ok(CommandResult::failure(1)),
            PassOutcome::AwaitingPermission { .. } | PassOutcome::Ignored => {
                tracing::warn!("Pass ended without a result: {}", outcome.label());
                Ok(CommandResult::failure(1))
            }
        }
    }
}
