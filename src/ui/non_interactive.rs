//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::theme::StartgateTheme;
use super::{parse_bool_answer, OutputMode, Prompt, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `STARTGATE_PROMPT_<KEY>` environment variables.
/// A prompt without an answer is declined: unattended runs never grant
/// anything on their own.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
    theme: StartgateTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI reading overrides from the environment.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("STARTGATE_PROMPT_"))
            .collect();
        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
            theme: StartgateTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let env_key = prompt.env_key();
        let Some(value) = self.env_overrides.get(&env_key) else {
            tracing::debug!("No {} set, declining '{}'", env_key, prompt.key);
            return Ok(false);
        };
        match parse_bool_answer(value) {
            Some(answer) => Ok(answer),
            None => {
                tracing::warn!("Unrecognized answer {}={:?}, declining", env_key, value);
                Ok(false)
            }
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner {
            show: self.mode.shows_status(),
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_field(&mut self, key: &str, value: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_field(key, value));
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }
}

/// Spinner that prints only its final line.
struct NoopSpinner {
    show: bool,
    theme: StartgateTheme,
}

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("  {}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        if self.show {
            println!("  {}", self.theme.format_error(msg));
        }
    }
}
