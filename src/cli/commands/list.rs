//! `passkey list` — display all services in a table.

use crate::audit::Event;
use crate::cli::output;
use crate::cli::{open_vault, record, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (path, vault) = open_vault(cli)?;

    let services = vault.list_services();

    output::info(&format!(
        "{} — {} service(s)",
        path.display(),
        services.len()
    ));

    output::print_services_table(services);

    record(&path, Event::Listed, None, None);

    Ok(())
}
