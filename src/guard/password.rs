//! Admin password verifier.
//!
//! Hashes are Argon2id PHC strings. Verification reads the cost parameters
//! embedded in the stored string, so a hash produced with different costs
//! still verifies.

use anyhow::{Result, anyhow};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

// 19 MiB memory, 2 iterations, parallelism 1.
const DEFAULT_M_COST_KIB: u32 = 19_456;
const DEFAULT_T_COST: u32 = 2;
const DEFAULT_P_COST: u32 = 1;

fn default_params() -> Result<Params> {
    Params::new(DEFAULT_M_COST_KIB, DEFAULT_T_COST, DEFAULT_P_COST, None)
        .map_err(|e| anyhow!("Invalid Argon2 parameters: {e}"))
}

/// Hash a plaintext password into a PHC-encoded Argon2id string.
///
/// # Errors
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_params(password, default_params()?)
}

/// Same as [`hash_password`] with explicit cost parameters.
///
/// # Errors
/// Returns an error if hashing fails.
pub fn hash_password_with_params(password: &str, params: Params) -> Result<String> {
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {e}"))?
        .to_string();
    Ok(hash)
}

/// Check that a PHC string is well formed, without verifying anything.
///
/// # Errors
/// Returns an error describing why the string cannot be parsed.
pub fn validate_hash(password_hash: &str) -> Result<()> {
    PasswordHash::new(password_hash)
        .map(|_| ())
        .map_err(|e| anyhow!("Invalid password hash format: {e}"))
}

/// Returns:
/// - `Ok(true)` if the password matches
/// - `Ok(false)` if it does not
/// - `Err(_)` if the stored hash is malformed
///
/// # Errors
/// See above.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    #[cfg(test)]
    VERIFICATIONS.with(|count| count.set(count.get() + 1));

    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| anyhow!("Invalid password hash format: {e}"))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("Failed to verify password: {e}")),
    }
}

#[cfg(test)]
thread_local! {
    static VERIFICATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Number of `verify_password` calls made on the current thread.
#[cfg(test)]
pub(crate) fn verifications() -> usize {
    VERIFICATIONS.with(std::cell::Cell::get)
}

#[cfg(test)]
pub(crate) fn fast_params() -> Params {
    // Minimal costs keep tests quick; production hashes use the defaults.
    Params::new(Params::MIN_M_COST, 1, 1, None).unwrap_or_default()
}
