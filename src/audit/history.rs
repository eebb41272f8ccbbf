//! SQLite storage for a vault's access history.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OpenFlags};

use super::Event;
use crate::errors::{PasskeyError, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS events (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    at      TEXT NOT NULL,
    event   TEXT NOT NULL,
    service TEXT,
    note    TEXT
);";

/// One recorded event, as read back from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub at: DateTime<Utc>,
    pub event: Event,
    pub service: Option<String>,
    pub note: Option<String>,
}

/// Which entries `History::entries` returns.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// At most this many entries. `None` means all of them.
    pub limit: Option<usize>,
    /// Only entries at or after this instant.
    pub since: Option<DateTime<Utc>>,
    /// Only `unlock-failed` entries.
    pub failures_only: bool,
}

/// Wrong-passkey attempts since the vault was last opened successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FailedUnlocks {
    pub count: u64,
    pub latest: Option<DateTime<Utc>>,
}

/// The history database belonging to one vault file.
pub struct History {
    conn: Connection,
}

/// Where the history for `vault_path` lives: `<dir>/<stem>.history.db`.
pub fn history_path(vault_path: &Path) -> PathBuf {
    let stem = vault_path
        .file_stem()
        .map_or_else(|| "vault".to_string(), |s| s.to_string_lossy().into_owned());
    vault_path.with_file_name(format!("{stem}.history.db"))
}

impl History {
    /// Open the history for `vault_path`, creating it (mode 0600) if needed.
    pub fn open(vault_path: &Path) -> Result<Self> {
        let path = history_path(vault_path);
        create_private_file(&path)
            .map_err(|e| PasskeyError::AuditError(format!("create {}: {e}", path.display())))?;

        let conn = Connection::open(&path).map_err(sql_error)?;
        conn.busy_timeout(Duration::from_secs(2)).map_err(sql_error)?;
        conn.execute_batch(SCHEMA).map_err(sql_error)?;
        Ok(Self { conn })
    }

    /// Open an existing history read-only. `Ok(None)` if none was recorded.
    pub fn open_existing(vault_path: &Path) -> Result<Option<Self>> {
        let path = history_path(vault_path);
        if !path.exists() {
            return Ok(None);
        }
        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(sql_error)?;
        Ok(Some(Self { conn }))
    }

    /// Append an event stamped with the current time.
    pub fn record(&self, event: Event, service: Option<&str>, note: Option<&str>) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO events (at, event, service, note) VALUES (?1, ?2, ?3, ?4)",
                params![stamp(Utc::now()), event.as_str(), service, note],
            )
            .map_err(sql_error)?;
        Ok(())
    }

    /// Entries matching `filter`, newest first.
    pub fn entries(&self, filter: &Filter) -> Result<Vec<Entry>> {
        // SQLite treats a negative LIMIT as "no limit".
        let limit = filter
            .limit
            .map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
        let since = filter.since.map(stamp).unwrap_or_default();

        let mut stmt = self
            .conn
            .prepare(
                "SELECT at, event, service, note FROM events
                 WHERE at >= ?1 AND (?2 = 0 OR event = ?3)
                 ORDER BY id DESC
                 LIMIT ?4",
            )
            .map_err(sql_error)?;

        let rows = stmt
            .query_map(
                params![
                    since,
                    filter.failures_only,
                    Event::UnlockFailed.as_str(),
                    limit
                ],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ))
                },
            )
            .map_err(sql_error)?;

        let mut entries = Vec::new();
        for row in rows {
            let (at, event, service, note) = row.map_err(sql_error)?;
            entries.push(Entry {
                at: parse_stamp(&at)?,
                event: event.parse()?,
                service,
                note,
            });
        }
        Ok(entries)
    }

    /// Count `unlock-failed` events recorded after the last successful one.
    pub fn failed_unlocks_since_last_access(&self) -> Result<FailedUnlocks> {
        let failed = Event::UnlockFailed.as_str();
        let (count, latest) = self
            .conn
            .query_row(
                "SELECT COUNT(*), MAX(at) FROM events
                 WHERE event = ?1
                   AND id > COALESCE((SELECT MAX(id) FROM events WHERE event != ?1), 0)",
                params![failed],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?)),
            )
            .map_err(sql_error)?;

        Ok(FailedUnlocks {
            count: u64::try_from(count).unwrap_or(0),
            latest: latest.as_deref().map(parse_stamp).transpose()?,
        })
    }
}

/// Fixed-width UTC timestamps, so text comparison is chronological.
fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_stamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| PasskeyError::AuditError(format!("bad timestamp '{raw}': {e}")))
}

fn create_private_file(path: &Path) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(false);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    options.open(path).map(drop)
}

fn sql_error(err: rusqlite::Error) -> PasskeyError {
    PasskeyError::AuditError(err.to_string())
}
