//! Cryptographic primitives for passkey-cli.
//!
//! This module provides:
//! - Argon2id passkey hashing and constant-time verification (`passkey`)
//! - Random password generation from the OS CSPRNG (`generator`)

pub mod generator;
pub mod passkey;

pub use generator::generate;
pub use passkey::{hash, verify};
