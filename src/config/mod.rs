//! User configuration (`config.toml` under the passkey-cli config directory).

pub mod settings;

pub use settings::Settings;
