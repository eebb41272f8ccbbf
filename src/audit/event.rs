//! The kinds of event recorded in a vault's access history.

use std::fmt;
use std::str::FromStr;

use crate::errors::PasskeyError;

/// Something that happened to a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// `init` wrote a new vault.
    Created,
    /// A service was added.
    Added,
    /// A password was printed by `get`.
    Revealed,
    /// The service list was shown.
    Listed,
    /// A service was renamed or given a new password.
    Updated,
    /// A service was removed.
    Deleted,
    /// A password was placed on the clipboard.
    Copied,
    /// The history itself was viewed.
    Inspected,
    /// Someone supplied the wrong passkey.
    UnlockFailed,
}

impl Event {
    pub const ALL: [Event; 9] = [
        Event::Created,
        Event::Added,
        Event::Revealed,
        Event::Listed,
        Event::Updated,
        Event::Deleted,
        Event::Copied,
        Event::Inspected,
        Event::UnlockFailed,
    ];

    /// Name stored in the history database.
    pub fn as_str(self) -> &'static str {
        match self {
            Event::Created => "created",
            Event::Added => "added",
            Event::Revealed => "revealed",
            Event::Listed => "listed",
            Event::Updated => "updated",
            Event::Deleted => "deleted",
            Event::Copied => "copied",
            Event::Inspected => "inspected",
            Event::UnlockFailed => "unlock-failed",
        }
    }

    /// `true` for events that did not get past the passkey check.
    pub fn is_failure(self) -> bool {
        matches!(self, Event::UnlockFailed)
    }

    /// `true` for events that expose a stored password.
    pub fn discloses_password(self) -> bool {
        matches!(self, Event::Revealed | Event::Copied)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Event {
    type Err = PasskeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Event::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| PasskeyError::AuditError(format!("unknown history event '{s}'")))
    }
}
