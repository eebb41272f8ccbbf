//! Random password generation for service entries.

use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::Zeroize;

use crate::errors::{PasskeyError, Result};

/// Length of every generated password.
pub const PASSWORD_LEN: usize = 18;

/// Characters a generated password is drawn from (70 total).
pub const ALPHABET: &[u8; 70] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Largest multiple of the alphabet size that fits in a byte.
/// Bytes at or above this bound are rejected to keep the draw uniform.
const REJECTION_BOUND: u8 = (256 / ALPHABET.len() * ALPHABET.len()) as u8;

/// Generate a fresh password from the OS random source.
pub fn generate() -> Result<String> {
    let mut password = String::with_capacity(PASSWORD_LEN);
    let mut buf = [0u8; 32];

    while password.len() < PASSWORD_LEN {
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| PasskeyError::RandomSourceUnavailable(e.to_string()))?;

        for &byte in buf.iter().filter(|&&b| b < REJECTION_BOUND) {
            if password.len() == PASSWORD_LEN {
                break;
            }
            password.push(char::from(ALPHABET[usize::from(byte) % ALPHABET.len()]));
        }
    }

    buf.zeroize();
    Ok(password)
}
