//! `passkey init` — create a new, empty vault.

use crate::audit::Event;
use crate::cli::output;
use crate::cli::{load_settings, prompt_new_passkey, record, vault_path, Cli};
use crate::errors::{PasskeyError, Result};
use crate::vault::Vault;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = vault_path(cli)?;

    // 1. Never overwrite an existing vault.
    if path.exists() {
        output::tip("Use `passkey add <NAME>` to add services to the existing vault.");
        return Err(PasskeyError::VaultAlreadyExists(path));
    }

    // 2. Prompt for a new passkey (with confirmation).
    let settings = load_settings()?;
    let passkey = prompt_new_passkey(cli, settings.min_passkey_length)?;

    // 3. Hash the passkey and write the empty vault.
    let vault = Vault::create(passkey.as_bytes())?;
    vault.save(&path)?;

    record(&path, Event::Created, None, None);

    output::success(&format!("Vault created at {}", path.display()));
    output::tip("Run `passkey add <NAME>` to add a service.");
    output::tip("Run `passkey list` to see all services.");

    Ok(())
}
