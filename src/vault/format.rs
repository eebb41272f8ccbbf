//! On-disk vault document and atomic file writes.
//!
//! A vault file is a single pretty-printed JSON document:
//!
//! ```text
//! {
//!   "passkey_hash": "<base64 no-pad of salt || argon2id digest>",
//!   "services": [
//!     { "name": "github", "password": "...", "createdAt": "2025-01-01T12:00:00Z" }
//!   ]
//! }
//! ```
//!
//! The whole document is rewritten on every save via temp file + rename,
//! so a reader never observes a half-written vault.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use zeroize::Zeroize;

use super::service::Service;
use crate::errors::{PasskeyError, Result};

/// The raw, unauthenticated contents of a vault file.
///
/// Only `Vault::load` turns one of these into something callers can use,
/// and only after the passkey has been verified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct VaultDocument {
    /// Encoded passkey hash. Empty means the vault was never initialized.
    #[serde(default, alias = "passkeyHash")]
    pub passkey_hash: String,

    /// Services in insertion order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub services: Vec<Service>,
}

/// Read and parse a vault file.
///
/// Does not look at the passkey hash; that is the caller's job.
pub(crate) fn read_document(path: &Path) -> Result<VaultDocument> {
    let mut data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PasskeyError::VaultMissing(path.to_path_buf()));
        }
        Err(e) => return Err(persistence_error("read", path, &e)),
    };

    let parsed = serde_json::from_slice::<VaultDocument>(&data);
    data.zeroize();

    parsed.map_err(|e| PasskeyError::MalformedVault(format!("{}: {e}", path.display())))
}

/// Write a vault document to disk **atomically**.
///
/// 1. Serialize the document to pretty JSON.
/// 2. Create the parent directory (owner-only) if it is missing.
/// 3. Write to a temp file in the same directory and fsync it.
/// 4. Rename the temp file over the target path.
///
/// On any failure the temp file is removed and the previous vault file
/// is left untouched.
pub(crate) fn write_document(path: &Path, document: &VaultDocument) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(document)
        .map_err(|e| PasskeyError::PersistenceFailed(format!("serialize vault: {e}")))?;
    bytes.push(b'\n');

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    create_private_dir(parent).map_err(|e| persistence_error("create directory", parent, &e))?;

    let tmp_path = parent.join(format!(
        ".{}.{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id()
    ));

    let written = write_synced(&tmp_path, &bytes).and_then(|()| fs::rename(&tmp_path, path));
    bytes.zeroize();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(persistence_error("write", path, &e));
    }

    sync_dir(parent);
    Ok(())
}

/// Create `dir` and any missing ancestors with mode 0700 on Unix.
fn create_private_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(dir)
}

/// Write `bytes` to a fresh owner-only file and flush it to disk.
fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    // A leftover from a crashed run with the same PID would block create_new.
    let _ = fs::remove_file(path);

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Persist the rename itself. Best-effort: not every platform allows it.
fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    {
        if let Ok(handle) = fs::File::open(dir) {
            let _ = handle.sync_all();
        }
    }

    #[cfg(not(unix))]
    let _ = dir;
}

fn persistence_error(action: &str, path: &Path, err: &io::Error) -> PasskeyError {
    PasskeyError::PersistenceFailed(format!("{action} {}: {err}", path.display()))
}

/// Older vault files may carry `"services": null`.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Service>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Service>>::deserialize(deserializer)?.unwrap_or_default())
}
