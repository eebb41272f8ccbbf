use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in passkey-cli.
#[derive(Debug, Error)]
pub enum PasskeyError {
    // --- Crypto errors ---
    #[error("Stored passkey hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Authentication failed — invalid passkey")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    // --- Vault errors ---
    #[error("Vault not found at {0} — run `passkey init` first")]
    VaultMissing(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Invalid vault file: {0}")]
    MalformedVault(String),

    #[error("Vault is not initialized — no passkey hash is set")]
    VaultUninitialized,

    #[error("Failed to persist vault: {0}")]
    PersistenceFailed(String),

    #[error("Service '{0}' not found")]
    ServiceNotFound(String),

    #[error("Service '{0}' already exists")]
    ServiceAlreadyExists(String),

    // --- Clipboard errors ---
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for passkey-cli results.
pub type Result<T> = std::result::Result<T, PasskeyError>;
