//! Passkey hashing and verification using Argon2id.
//!
//! The stored value is `base64_nopad(salt || digest)` where the salt is
//! 16 random bytes and the digest is 32 bytes of Argon2id output.  The
//! parameters below are fixed: every vault file ever written depends on
//! them, so they are not configurable.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::engine::general_purpose::STANDARD_NO_PAD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::TryRngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::errors::{PasskeyError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the Argon2id digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Shortest digest we accept when decoding a stored hash.
const MIN_DIGEST_LEN: usize = 1;

/// Memory cost in KiB (64 MiB).
const MEMORY_KIB: u32 = 64 * 1024;

/// Number of passes over memory.
const TIME_COST: u32 = 1;

/// Parallel lanes.
const LANES: u32 = 4;

/// Hash a passkey with a fresh random salt.
///
/// Returns the base64 (no padding) encoding of `salt || digest`.
pub fn hash(passkey: &[u8]) -> Result<String> {
    let salt = generate_salt()?;
    let mut digest = derive(passkey, &salt)?;

    let mut combined = Vec::with_capacity(SALT_LEN + DIGEST_LEN);
    combined.extend_from_slice(&salt);
    combined.extend_from_slice(&digest);
    digest.zeroize();

    let encoded = BASE64.encode(&combined);
    combined.zeroize();
    Ok(encoded)
}

/// Check a candidate passkey against a stored hash.
///
/// Returns `Ok(false)` on mismatch and `Err(MalformedHash)` when the
/// stored value cannot be decoded or is too short to hold a salt and a
/// digest.
pub fn verify(encoded: &str, passkey: &[u8]) -> Result<bool> {
    let data = BASE64
        .decode(encoded)
        .map_err(|e| PasskeyError::MalformedHash(format!("invalid base64: {e}")))?;

    if data.len() < SALT_LEN + MIN_DIGEST_LEN {
        return Err(PasskeyError::MalformedHash(format!(
            "expected at least {} bytes, got {}",
            SALT_LEN + MIN_DIGEST_LEN,
            data.len()
        )));
    }

    let (salt, stored_digest) = data.split_at(SALT_LEN);
    let mut candidate = derive(passkey, salt)?;

    // Slices of different lengths compare unequal without leaking where.
    let matches: bool = candidate.as_slice().ct_eq(stored_digest).into();
    candidate.zeroize();

    Ok(matches)
}

/// Run Argon2id with the fixed vault parameters.
fn derive(passkey: &[u8], salt: &[u8]) -> Result<[u8; DIGEST_LEN]> {
    let params = Params::new(MEMORY_KIB, TIME_COST, LANES, Some(DIGEST_LEN))
        .map_err(|e| PasskeyError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut digest = [0u8; DIGEST_LEN];
    argon2
        .hash_password_into(passkey, salt, &mut digest)
        .map_err(|e| PasskeyError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(digest)
}

/// Generate a cryptographically random salt from the OS.
fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| PasskeyError::RandomSourceUnavailable(e.to_string()))?;
    Ok(salt)
}
