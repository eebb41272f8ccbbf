//! `passkey copy` — copy a service's password to the system clipboard.

use crate::audit::Event;
use crate::cli::output;
use crate::cli::{open_vault, record, Cli};
use crate::clipboard::SystemClipboard;
use crate::errors::Result;

/// Execute the `copy` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let (path, vault) = open_vault(cli)?;

    let mut clipboard = SystemClipboard;
    vault.copy_service_password(name, &mut clipboard)?;

    record(&path, Event::Copied, Some(name), None);
    output::success(&format!("Password for '{name}' copied to clipboard"));

    Ok(())
}
