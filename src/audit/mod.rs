//! Per-vault access history.
//!
//! Every command that unlocks a vault leaves one event behind, and a wrong
//! passkey leaves an `unlock-failed` event. Events go to a SQLite database
//! beside the vault file (`vault.json` -> `vault.history.db`), so two
//! vaults in one directory never share a history. Service names are
//! recorded; passwords and passkeys never are.

mod event;
#[cfg(feature = "audit-log")]
mod history;

pub use event::Event;
#[cfg(feature = "audit-log")]
pub use history::{history_path, Entry, FailedUnlocks, Filter, History};
