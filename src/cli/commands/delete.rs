//! `passkey delete` — remove a service from the vault.

use dialoguer::Confirm;

use crate::audit::Event;
use crate::cli::output;
use crate::cli::{open_vault, record, Cli};
use crate::errors::{PasskeyError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete service '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| PasskeyError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let (path, mut vault) = open_vault(cli)?;

    // Delete the service and save once.
    vault.delete_service(name)?;
    vault.save(&path)?;

    record(&path, Event::Deleted, Some(name), None);
    output::success(&format!("Deleted service '{name}'"));

    Ok(())
}
