//! Collects what the orchestrator asks the host to do.
//!
//! The orchestrator owns its prompter, router and notice sink. The host
//! hands it an [`Outbox`] clone for each role and drains the shared queue
//! after every event.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::orchestrator::{FlowRouter, Notice, NoticeSink, Route};
use crate::permission::{PermissionPrompter, PermissionSet};

#[derive(Debug, Default)]
struct Queue {
    prompts: VecDeque<PermissionSet>,
    notices: VecDeque<Notice>,
    route: Option<Route>,
}

/// Shared queue of prompts, notices and routes.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queue: Rc<RefCell<Queue>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// The oldest undelivered permission prompt.
    pub fn take_prompt(&self) -> Option<PermissionSet> {
        self.queue.borrow_mut().prompts.pop_front()
    }

    /// All undelivered notices, oldest first.
    pub fn take_notices(&self) -> Vec<Notice> {
        self.queue.borrow_mut().notices.drain(..).collect()
    }

    /// The route requested since the last call.
    pub fn take_route(&self) -> Option<Route> {
        self.queue.borrow_mut().route.take()
    }
}

impl PermissionPrompter for Outbox {
    fn launch(&mut self, permissions: &PermissionSet) {
        self.queue.borrow_mut().prompts.push_back(permissions.clone());
    }
}

impl NoticeSink for Outbox {
    fn notify(&mut self, notice: Notice) {
        tracing::debug!("Notice raised: {}", notice);
        self.queue.borrow_mut().notices.push_back(notice);
    }
}

impl FlowRouter for Outbox {
    fn route_to_install_flow(&mut self) {
        self.queue.borrow_mut().route = Some(Route::Install);
    }

    fn route_to_main_flow(&mut self) {
        self.queue.borrow_mut().route = Some(Route::Main);
    }
}
