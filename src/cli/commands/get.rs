//! `passkey get` — print a single service's password.

use crate::audit::Event;
use crate::cli::{open_vault, record, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let (path, vault) = open_vault(cli)?;

    // Print only the password so the output can be piped.
    let service = vault.get_service(name)?;
    println!("{}", service.password);

    record(&path, Event::Revealed, Some(name), None);

    Ok(())
}
