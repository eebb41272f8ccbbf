//! `passkey audit`: show who has been opening the vault.
//!
//! The history is only shown after the vault has been unlocked, the same
//! as the service list.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::audit::{Event, Filter, History};
use crate::cli::output;
use crate::cli::{history_enabled, open_vault, record, Cli};
use crate::errors::{PasskeyError, Result};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>, failed: bool) -> Result<()> {
    let filter = Filter {
        limit: Some(last),
        since: since.map(|s| parse_since(s, Utc::now())).transpose()?,
        failures_only: failed,
    };

    let (path, _vault) = open_vault(cli)?;

    if !history_enabled() {
        output::warning("History recording is off (audit_log = false in config.toml).");
    }

    let entries = match History::open_existing(&path)? {
        Some(history) => history.entries(&filter)?,
        None => Vec::new(),
    };

    record(&path, Event::Inspected, None, None);

    if entries.is_empty() {
        output::info("No matching history for this vault.");
        return Ok(());
    }

    output::print_history_table(&entries);
    Ok(())
}

/// Turn `--since` into an instant.
///
/// Accepts an age counted back from `now` (`45s`, `90m`, `24h`, `7d`,
/// `2w`), an RFC 3339 timestamp, or a calendar date taken as midnight UTC.
fn parse_since(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Ok(at.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return day
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc())
            .ok_or_else(|| bad_since(input));
    }

    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (amount, unit) = input.split_at(split);
    let amount: i64 = amount.parse().map_err(|_| bad_since(input))?;

    let age = match unit {
        "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        "w" => Duration::try_weeks(amount),
        _ => None,
    }
    .ok_or_else(|| bad_since(input))?;

    now.checked_sub_signed(age).ok_or_else(|| bad_since(input))
}

fn bad_since(input: &str) -> PasskeyError {
    PasskeyError::CommandFailed(format!(
        "cannot read --since '{input}': use an age like 90m, 24h, 7d, 2w or a date like 2025-06-01"
    ))
}
