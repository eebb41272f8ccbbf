//! The `Service` entry stored inside a vault.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single named credential.
///
/// Field names are part of the on-disk format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique, case-sensitive service name (e.g. "github").
    pub name: String,

    /// The plaintext password.
    pub password: String,

    /// When this service was added. Never changes afterwards.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Service {
    /// Build a new service stamped with the current time.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }
}
