//! Small helpers shared by command handlers.

use std::io::IsTerminal;

use crate::error::CliError;

/// Ask for confirmation unless `--yes` was passed. In non-interactive
/// contexts (no TTY), `--yes` is required.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool, CliError> {
    if yes {
        return Ok(true);
    }

    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: prompt.to_owned(),
        });
    }

    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}
