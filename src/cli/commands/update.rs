//! `passkey update` — rename a service and/or regenerate its password.

use crate::audit::Event;
use crate::cli::output;
use crate::cli::{open_vault, record, validate_service_name, Cli};
use crate::errors::Result;

/// Execute the `update` command.
pub fn execute(cli: &Cli, old: &str, new: &str, regen: bool) -> Result<()> {
    validate_service_name(new)?;

    let (path, mut vault) = open_vault(cli)?;

    // Rename and regeneration land together, then one save.
    vault.update_service(old, new, regen)?;
    vault.save(&path)?;

    let detail = match (old != new, regen) {
        (true, true) => format!("renamed from '{old}', password regenerated"),
        (true, false) => format!("renamed from '{old}'"),
        (false, true) => "password regenerated".to_string(),
        (false, false) => "unchanged".to_string(),
    };
    record(&path, Event::Updated, Some(new), Some(&detail));

    output::success(&format!("Service '{new}' updated: {detail}"));

    Ok(())
}
