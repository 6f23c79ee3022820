//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertions. Confirm prompts are answered from
//! preset responses keyed by prompt key.

use std::collections::HashMap;

use crate::error::Result;

use super::{OutputMode, Prompt, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    responses: HashMap<String, bool>,
    default_response: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    fields: Vec<(String, String)>,
    spinners: Vec<String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new mock UI (non-interactive, declining by default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock UI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set the answer for prompt `key`.
    pub fn set_response(&mut self, key: &str, answer: bool) {
        self.responses.insert(key.to_string(), answer);
    }

    /// Set the answer for prompts without a preset response.
    pub fn set_default_response(&mut self, answer: bool) {
        self.default_response = answer;
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Key-value lines shown, in order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Value of the first field named `key`.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Keys of the prompts shown, in order.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        self.prompts_shown.push(prompt.key.clone());
        Ok(self
            .responses
            .get(&prompt.key)
            .copied()
            .unwrap_or(self.default_response))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_field(&mut self, key: &str, value: &str) {
        self.fields.push((key.to_string(), value.to_string()));
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }
}

/// How a mock spinner finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Error,
}

/// Mock spinner recording how it finished.
#[derive(Debug, Default)]
pub struct MockSpinner {
    finish: Option<(SpinnerStatus, String)>,
}

impl MockSpinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish_message(&self) -> Option<&str> {
        self.finish.as_ref().map(|(_, m)| m.as_str())
    }

    pub fn status(&self) -> Option<SpinnerStatus> {
        self.finish.as_ref().map(|(s, _)| *s)
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.finish = Some((SpinnerStatus::Success, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish = Some((SpinnerStatus::Error, msg.to_string()));
    }
}
