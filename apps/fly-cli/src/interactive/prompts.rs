//! TTY detection and confirmation prompts using dialoguer

use std::io::IsTerminal;

use dialoguer::Confirm;

use crate::error::{CliError, CliResult};

/// True when stdin and stdout are both attached to a terminal
pub fn is_interactive_terminal() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Fail early when a prompt cannot be shown
///
/// `skip_flag` names the flag that bypasses the prompt, for the error message.
pub fn require_interactive(skip_flag: &str) -> CliResult<()> {
    if !is_interactive_terminal() {
        return Err(CliError::Validation(format!(
            "Cannot confirm in non-interactive mode. Use {skip_flag} to skip confirmation."
        )));
    }
    Ok(())
}

/// Ask a yes/no question
pub fn prompt_confirm(prompt: &str, default: bool) -> CliResult<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CliError::from)
}
