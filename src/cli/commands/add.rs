//! `passkey add` — add a service with a freshly generated password.

use crate::audit::Event;
use crate::cli::output;
use crate::cli::{open_vault, record, validate_service_name, Cli};
use crate::crypto::generator;
use crate::errors::Result;

/// Execute the `add` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    validate_service_name(name)?;

    let (path, mut vault) = open_vault(cli)?;

    let password = generator::generate()?;
    vault.add_service(name, password)?;
    vault.save(&path)?;

    record(&path, Event::Added, Some(name), None);

    output::success(&format!(
        "Service '{}' added ({} total)",
        name,
        vault.service_count()
    ));
    output::tip(&format!("Run `passkey copy {name}` to copy its password."));

    Ok(())
}
