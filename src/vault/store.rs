//! The authenticated in-memory vault.
//!
//! A `Vault` can only be obtained through `Vault::create` (fresh passkey)
//! or `Vault::load` (passkey verified against the stored hash), so any
//! code holding one has already passed the admission check.

use std::path::Path;

use zeroize::Zeroize;

use crate::crypto::passkey;
use crate::errors::{PasskeyError, Result};

use super::format::{self, VaultDocument};
use super::service::Service;

/// An unlocked vault: the passkey hash plus the ordered service list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    /// Encoded Argon2id hash of the passkey. Set once at creation.
    passkey_hash: String,

    /// Services in insertion order, unique by name.
    pub(super) services: Vec<Service>,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a new, empty vault protected by `passkey`.
    ///
    /// Nothing is written to disk; call `save` to persist it.
    pub fn create(passkey: &[u8]) -> Result<Self> {
        let passkey_hash = passkey::hash(passkey)?;
        Ok(Self {
            passkey_hash,
            services: Vec::new(),
        })
    }

    /// Load the vault at `path` and verify `passkey` against its hash.
    ///
    /// A malformed stored hash is reported as `AuthenticationFailed` so
    /// callers cannot distinguish it from a wrong passkey.
    pub fn load(path: &Path, passkey: &[u8]) -> Result<Self> {
        let document = format::read_document(path)?;

        if document.passkey_hash.is_empty() {
            return Err(PasskeyError::VaultUninitialized);
        }

        match passkey::verify(&document.passkey_hash, passkey) {
            Ok(true) => {}
            Ok(false) | Err(PasskeyError::MalformedHash(_)) => {
                return Err(PasskeyError::AuthenticationFailed);
            }
            Err(e) => return Err(e),
        }

        Ok(Self {
            passkey_hash: document.passkey_hash,
            services: document.services,
        })
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write the whole vault to `path` atomically.
    ///
    /// On failure the file previously at `path` is still the valid one.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut document = VaultDocument {
            passkey_hash: self.passkey_hash.clone(),
            services: self.services.clone(),
        };
        let written = format::write_document(path, &document);
        wipe_passwords(&mut document.services);
        written
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the encoded passkey hash.
    pub fn passkey_hash(&self) -> &str {
        &self.passkey_hash
    }

    /// Returns the number of services in the vault.
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if a service with exactly this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Index of the service named `name`, if any.
    pub(super) fn position(&self, name: &str) -> Option<usize> {
        self.services.iter().position(|s| s.name == name)
    }
}

impl Drop for Vault {
    fn drop(&mut self) {
        wipe_passwords(&mut self.services);
    }
}

fn wipe_passwords(services: &mut [Service]) {
    for service in services {
        service.password.zeroize();
    }
}
