//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Service;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of services (Name, Created).
///
/// Passwords are never shown here; use `get` or `copy` for that.
pub fn print_services_table(services: &[Service]) {
    if services.is_empty() {
        info("No services in this vault yet.");
        tip("Run `passkey add <NAME>` to add your first service.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Created"]);

    for (i, s) in services.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            s.name.clone(),
            s.created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ]);
    }

    println!("{table}");
}

/// Print access history (When, Event, Service, Note), newest first.
///
/// Failed unlocks are red, password disclosures yellow.
#[cfg(feature = "audit-log")]
pub fn print_history_table(entries: &[crate::audit::Entry]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["When", "Event", "Service", "Note"]);

    for entry in entries {
        let event = if entry.event.is_failure() {
            style(entry.event.as_str()).red().bold().to_string()
        } else if entry.event.discloses_password() {
            style(entry.event.as_str()).yellow().to_string()
        } else {
            entry.event.as_str().to_string()
        };

        table.add_row(vec![
            entry
                .at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            event,
            entry.service.clone().unwrap_or_default(),
            entry.note.clone().unwrap_or_default(),
        ]);
    }

    let failures = entries.iter().filter(|e| e.event.is_failure()).count();
    println!("{table}");
    println!(
        "{} event(s), {} failed unlock(s)",
        entries.len(),
        style(failures).bold()
    );
}
