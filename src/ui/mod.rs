//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use startgate::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Print Host");
//! ui.success("Print server running");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_confirm;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, StartgateTheme};

use crate::error::Result;
use crate::permission::PermissionId;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &Prompt) -> Result<bool>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show one `key: value` line.
    fn show_field(&mut self, key: &str, value: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// A yes/no question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Unique key, used for `STARTGATE_PROMPT_<KEY>` overrides.
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Answer preselected in a terminal.
    pub default: bool,
}

impl Prompt {
    /// The confirm prompt asking for `permission`.
    pub fn permission(permission: &PermissionId) -> Self {
        Self {
            key: permission.as_str().to_string(),
            question: format!("Allow {} access?", permission),
            default: true,
        }
    }

    /// Environment variable that answers this prompt without a terminal.
    pub fn env_key(&self) -> String {
        let key: String = self
            .key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("STARTGATE_PROMPT_{}", key)
    }
}

/// Parse a yes/no answer.
pub fn parse_bool_answer(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "grant" => Some(true),
        "n" | "no" | "false" | "0" | "deny" => Some(false),
        _ => None,
    }
}
