//! Vault module — passkey-protected service storage.
//!
//! This module provides:
//! - The `Service` entry type (`service`)
//! - The JSON document and atomic file writes (`format`)
//! - The authenticated `Vault` with create/load/save (`store`)
//! - Service CRUD operations on a loaded vault (`registry`)

pub mod format;
pub mod registry;
pub mod service;
pub mod store;

// Re-export the most commonly used items.
pub use service::Service;
pub use store::Vault;
