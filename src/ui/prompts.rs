//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::error::{Result, StartgateError};

use super::Prompt;

fn map_dialoguer_err(e: dialoguer::Error) -> StartgateError {
    StartgateError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Ask `prompt` on `term`.
pub fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<bool> {
    Confirm::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .default(prompt.default)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}
