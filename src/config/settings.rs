use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PasskeyError, Result};

/// User-level configuration, loaded from `<config_dir>/passkey-cli/config.toml`.
///
/// Every field has a sensible default so passkey-cli works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file to use instead of `<config_dir>/passkey-cli/vault.json`.
    #[serde(default)]
    pub vault_path: Option<PathBuf>,

    /// Shortest passkey accepted when creating a vault.
    #[serde(default = "default_min_passkey_length")]
    pub min_passkey_length: usize,

    /// Record access history in `<vault stem>.history.db` next to the vault.
    #[serde(default = "default_audit_log")]
    pub audit_log: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_min_passkey_length() -> usize {
    8
}

fn default_audit_log() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_path: None,
            min_passkey_length: default_min_passkey_length(),
            audit_log: default_audit_log(),
        }
    }
}

impl Settings {
    /// Name of the config file inside the config directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Name of the vault file used when none is configured.
    const VAULT_FILE_NAME: &'static str = "vault.json";

    /// The passkey-cli config directory (e.g. `~/.config/passkey-cli`).
    ///
    /// Falls back to the current directory on platforms without one.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("passkey-cli"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load settings from `<config_dir>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PasskeyError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the vault file location.
    ///
    /// `vault_path` from the config wins; otherwise the vault lives in
    /// the config directory.
    pub fn vault_path(&self, config_dir: &Path) -> PathBuf {
        self.vault_path
            .clone()
            .unwrap_or_else(|| config_dir.join(Self::VAULT_FILE_NAME))
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert!(s.vault_path.is_none());
        assert_eq!(s.min_passkey_length, 8);
        assert!(s.audit_log);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.min_passkey_length, 8);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_path = "/srv/secrets/vault.json"
min_passkey_length = 12
audit_log = false
"#;
        fs::write(tmp.path().join("config.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(
            settings.vault_path,
            Some(PathBuf::from("/srv/secrets/vault.json"))
        );
        assert_eq!(settings.min_passkey_length, 12);
        assert!(!settings.audit_log);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "audit_log = false\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(!settings.audit_log);
        assert!(settings.vault_path.is_none());
        assert_eq!(settings.min_passkey_length, 8);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(PasskeyError::ConfigError(_))));
    }

    #[test]
    fn vault_path_defaults_to_config_dir() {
        let s = Settings::default();
        let dir = Path::new("/home/user/.config/passkey-cli");
        assert_eq!(
            s.vault_path(dir),
            PathBuf::from("/home/user/.config/passkey-cli/vault.json")
        );
    }

    #[test]
    fn vault_path_respects_override() {
        let s = Settings {
            vault_path: Some(PathBuf::from("/tmp/other.json")),
            ..Settings::default()
        };
        assert_eq!(
            s.vault_path(Path::new("/ignored")),
            PathBuf::from("/tmp/other.json")
        );
    }
}
