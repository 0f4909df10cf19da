//! Time-based one-time codes (RFC 6238, SHA-1, 6 digits, 30 s steps).
//!
//! A code is accepted for the previous, current, and next step to absorb one
//! step of clock skew in either direction.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;
use totp_rs::{Algorithm, Secret, TOTP};

pub const CODE_DIGITS: usize = 6;
pub const STEP_SECONDS: u64 = 30;
pub const SKEW_STEPS: u8 = 1;

/// `true` iff `code` is exactly six ASCII digits.
#[must_use]
pub fn well_formed(code: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[0-9]{6}$").ok())
        .as_ref()
        .is_some_and(|regex| regex.is_match(code))
}

#[derive(Clone)]
pub struct CodeVerifier {
    totp: TOTP,
}

impl CodeVerifier {
    /// Build a verifier from a base32 seed.
    ///
    /// # Errors
    /// Returns an error if the seed is not valid base32 or is shorter than 128 bits.
    pub fn from_base32(seed: &str, issuer: &str, account: &str) -> Result<Self> {
        let bytes = Secret::Encoded(seed.trim().to_uppercase())
            .to_bytes()
            .map_err(|e| anyhow!("Invalid one-time-code seed: {e}"))?;
        Self::from_bytes(bytes, issuer, account)
    }

    /// # Errors
    /// Returns an error if the seed is shorter than 128 bits or the labels contain ':'.
    pub fn from_bytes(seed: Vec<u8>, issuer: &str, account: &str) -> Result<Self> {
        let totp = TOTP::new(
            Algorithm::SHA1,
            CODE_DIGITS,
            SKEW_STEPS,
            STEP_SECONDS,
            seed,
            Some(issuer.to_string()),
            account.to_string(),
        )
        .map_err(|e| anyhow!("TOTP init error: {e}"))?;
        Ok(Self { totp })
    }

    /// Generates a fresh 160-bit seed and returns it with its verifier.
    ///
    /// # Errors
    /// Returns an error if the generated seed is rejected.
    pub fn generate(issuer: &str, account: &str) -> Result<(String, Self)> {
        let secret = Secret::generate_secret();
        let bytes = secret
            .to_bytes()
            .map_err(|e| anyhow!("Secret gen error: {e}"))?;
        let encoded = Secret::Raw(bytes.clone()).to_encoded().to_string();
        Ok((encoded, Self::from_bytes(bytes, issuer, account)?))
    }

    /// Code for the step containing `at`.
    #[must_use]
    pub fn code_at(&self, at: DateTime<Utc>) -> String {
        self.totp.generate(unix_seconds(at))
    }

    /// Accepts codes for the steps before, at, and after `at`.
    #[must_use]
    pub fn check(&self, code: &str, at: DateTime<Utc>) -> bool {
        well_formed(code) && self.totp.check(code, unix_seconds(at))
    }

    /// `otpauth://` URI for authenticator apps.
    #[must_use]
    pub fn provisioning_uri(&self) -> String {
        self.totp.get_url()
    }
}

impl std::fmt::Debug for CodeVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeVerifier")
            .field("digits", &CODE_DIGITS)
            .field("step", &STEP_SECONDS)
            .field("seed", &"***")
            .finish()
    }
}

fn unix_seconds(at: DateTime<Utc>) -> u64 {
    u64::try_from(at.timestamp()).unwrap_or(0)
}
