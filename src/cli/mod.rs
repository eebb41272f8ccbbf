//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;

use zeroize::Zeroizing;

use crate::audit::Event;
use crate::config::Settings;
use crate::errors::{PasskeyError, Result};
use crate::vault::Vault;

/// Environment variable consulted for the passkey before prompting.
pub const PASSKEY_ENV: &str = "PASSKEY_CLI_PASSKEY";

/// Longest service name we accept.
const MAX_SERVICE_NAME_LEN: usize = 256;

/// passkey-cli: a local passkey-protected credential vault.
#[derive(Parser)]
#[command(
    name = "passkey",
    about = "Local passkey-protected vault for service passwords",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the vault file (default: <config dir>/passkey-cli/vault.json)
    #[arg(long, env = "PASSKEY_VAULT", global = true)]
    pub vault: Option<PathBuf>,

    /// Vault passkey (omit to use PASSKEY_CLI_PASSKEY or an interactive prompt)
    #[arg(short, long, global = true)]
    pub passkey: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// Add a service with a generated password
    Add {
        /// Service name (e.g. github)
        name: String,
    },

    /// Print a service's password
    Get {
        /// Service name
        name: String,
    },

    /// List all services (names and creation dates only)
    List,

    /// Rename a service and/or regenerate its password
    Update {
        /// Current service name
        old: String,
        /// New service name (repeat the current name to keep it)
        new: String,
        /// Regenerate the password as well
        #[arg(short, long)]
        regen: bool,
    },

    /// Delete a service
    Delete {
        /// Service name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Copy a service's password to the clipboard
    Copy {
        /// Service name
        name: String,
    },

    /// Show the access history of the vault
    Audit {
        /// Number of entries to show
        #[arg(long, default_value = "50")]
        last: usize,
        /// Only entries newer than an age (90m, 24h, 7d, 2w) or a date (2025-06-01)
        #[arg(long)]
        since: Option<String>,
        /// Only failed unlock attempts
        #[arg(long)]
        failed: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load user settings from the default config directory.
pub fn load_settings() -> Result<Settings> {
    Settings::load(&Settings::config_dir())
}

/// Resolve the vault file path: `--vault` / `PASSKEY_VAULT`, then the
/// config file, then the default location.
pub fn vault_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.vault {
        return Ok(path.clone());
    }
    let settings = load_settings()?;
    Ok(settings.vault_path(&Settings::config_dir()))
}

/// Get the vault passkey, trying in order:
/// 1. `--passkey` flag
/// 2. `PASSKEY_CLI_PASSKEY` env var (scripts/CI)
/// 3. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passkey is wiped from memory on drop.
pub fn prompt_passkey(cli: &Cli) -> Result<Zeroizing<String>> {
    if let Some(passkey) = non_interactive_passkey(cli) {
        return passkey;
    }

    let passkey = dialoguer::Password::new()
        .with_prompt("Enter vault passkey")
        .interact()
        .map_err(|e| PasskeyError::CommandFailed(format!("passkey prompt: {e}")))?;
    require_non_empty(Zeroizing::new(passkey))
}

/// Prompt for a new passkey with confirmation (used during `init`).
///
/// Also respects `--passkey` and `PASSKEY_CLI_PASSKEY`.  Enforces the
/// configured minimum length.
pub fn prompt_new_passkey(cli: &Cli, min_len: usize) -> Result<Zeroizing<String>> {
    if let Some(passkey) = non_interactive_passkey(cli) {
        let passkey = passkey?;
        if passkey.chars().count() < min_len {
            return Err(PasskeyError::CommandFailed(format!(
                "passkey must be at least {min_len} characters"
            )));
        }
        return Ok(passkey);
    }

    loop {
        let passkey = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose vault passkey")
                .with_confirmation("Confirm vault passkey", "Passkeys do not match, try again")
                .interact()
                .map_err(|e| PasskeyError::CommandFailed(format!("passkey prompt: {e}")))?,
        );

        if passkey.is_empty() || passkey.chars().count() < min_len {
            output::warning(&format!(
                "Passkey must be at least {} characters. Try again.",
                min_len.max(1)
            ));
            continue;
        }

        return Ok(passkey);
    }
}

/// Passkey from the flag or the environment, if either is set.
fn non_interactive_passkey(cli: &Cli) -> Option<Result<Zeroizing<String>>> {
    if let Some(passkey) = &cli.passkey {
        output::warning("Passkey provided on command line — it may appear in shell history.");
        return Some(require_non_empty(Zeroizing::new(passkey.clone())));
    }

    match std::env::var(PASSKEY_ENV) {
        Ok(passkey) if !passkey.is_empty() => Some(Ok(Zeroizing::new(passkey))),
        _ => None,
    }
}

fn require_non_empty(passkey: Zeroizing<String>) -> Result<Zeroizing<String>> {
    if passkey.is_empty() {
        return Err(PasskeyError::CommandFailed(
            "passkey cannot be empty".into(),
        ));
    }
    Ok(passkey)
}

/// Resolve the vault path, obtain the passkey, and unlock the vault.
///
/// A wrong passkey is recorded in the vault's history. After a successful
/// unlock, any wrong-passkey attempts since the previous access are
/// reported as a warning.
pub fn open_vault(cli: &Cli) -> Result<(PathBuf, Vault)> {
    let path = vault_path(cli)?;
    let passkey = prompt_passkey(cli)?;

    let vault = match Vault::load(&path, passkey.as_bytes()) {
        Ok(vault) => vault,
        Err(PasskeyError::AuthenticationFailed) => {
            record(&path, Event::UnlockFailed, None, None);
            return Err(PasskeyError::AuthenticationFailed);
        }
        Err(e) => return Err(e),
    };

    warn_about_failed_unlocks(&path);
    Ok((path, vault))
}

/// Validate a service name before it reaches the vault.
///
/// Must be non-empty, at most 256 characters, and free of control
/// characters (they would garble table output).
pub fn validate_service_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PasskeyError::CommandFailed(
            "service name cannot be empty".into(),
        ));
    }
    if name.chars().count() > MAX_SERVICE_NAME_LEN {
        return Err(PasskeyError::CommandFailed(format!(
            "service name cannot exceed {MAX_SERVICE_NAME_LEN} characters"
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(PasskeyError::CommandFailed(format!(
            "service name {name:?} contains control characters"
        )));
    }
    Ok(())
}

/// Whether access history is recorded (`audit_log` in config.toml).
pub fn history_enabled() -> bool {
    cfg!(feature = "audit-log") && load_settings().map_or(true, |s| s.audit_log)
}

/// Append an event to the vault's history, if enabled.
///
/// History is secondary to the vault: failures only produce a warning.
pub fn record(vault_path: &Path, event: Event, service: Option<&str>, note: Option<&str>) {
    if !history_enabled() {
        return;
    }

    #[cfg(feature = "audit-log")]
    {
        let recorded = crate::audit::History::open(vault_path)
            .and_then(|history| history.record(event, service, note));
        if let Err(e) = recorded {
            output::warning(&format!("could not record {event} in history: {e}"));
        }
    }

    #[cfg(not(feature = "audit-log"))]
    let _ = (vault_path, event, service, note);
}

fn warn_about_failed_unlocks(vault_path: &Path) {
    if !history_enabled() {
        return;
    }

    #[cfg(feature = "audit-log")]
    {
        let failed = crate::audit::History::open_existing(vault_path)
            .and_then(|history| match history {
                Some(history) => history.failed_unlocks_since_last_access(),
                None => Ok(crate::audit::FailedUnlocks::default()),
            });

        if let Ok(crate::audit::FailedUnlocks {
            count,
            latest: Some(latest),
        }) = failed
        {
            if count > 0 {
                // stderr only: `get` output may be piped.
                output::warning(&format!(
                    "{count} failed unlock attempt(s) since this vault was last opened \
                     (latest {}). See `passkey audit --failed`.",
                    latest
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M:%S")
                ));
            }
        }
    }

    #[cfg(not(feature = "audit-log"))]
    let _ = vault_path;
}
