//! Guard configuration: the admin identity plus window and TTL settings.

use anyhow::{Context, Result, bail};
use chrono::Duration;
use secrecy::SecretString;

const DEFAULT_SESSION_TTL_SECONDS: i64 = 8 * 60 * 60;
const DEFAULT_LOCKOUT_WINDOW_SECONDS: i64 = 30 * 60;
const DEFAULT_MAX_FAILED_ATTEMPTS: usize = 5;
const DEFAULT_ATTEMPT_RETENTION_SECONDS: i64 = 24 * 60 * 60;
const DEFAULT_TOTP_ISSUER: &str = "Tutorgate";

/// Upper bound for every configured duration (365 days).
pub const MAX_DURATION_SECONDS: i64 = 365 * 24 * 60 * 60;

/// The single admin identity. Fixed for the lifetime of the process.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: SecretString,
    totp_secret: SecretString,
}

impl AdminCredentials {
    /// `password_hash` is an Argon2id PHC string, `totp_secret` a base32 seed.
    #[must_use]
    pub fn new(username: String, password_hash: SecretString, totp_secret: SecretString) -> Self {
        Self {
            username,
            password_hash,
            totp_secret,
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password_hash(&self) -> &SecretString {
        &self.password_hash
    }

    pub(crate) fn totp_secret(&self) -> &SecretString {
        &self.totp_secret
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password_hash", &"***")
            .field("totp_secret", &"***")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct GuardConfig {
    credentials: AdminCredentials,
    totp_issuer: String,
    session_ttl_seconds: i64,
    lockout_window_seconds: i64,
    max_failed_attempts: usize,
    attempt_retention_seconds: i64,
}

impl GuardConfig {
    #[must_use]
    pub fn new(credentials: AdminCredentials) -> Self {
        Self {
            credentials,
            totp_issuer: DEFAULT_TOTP_ISSUER.to_string(),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            lockout_window_seconds: DEFAULT_LOCKOUT_WINDOW_SECONDS,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            attempt_retention_seconds: DEFAULT_ATTEMPT_RETENTION_SECONDS,
        }
    }

    #[must_use]
    pub fn with_totp_issuer(mut self, issuer: String) -> Self {
        self.totp_issuer = issuer;
        self
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_lockout_window_seconds(mut self, seconds: i64) -> Self {
        self.lockout_window_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_max_failed_attempts(mut self, attempts: usize) -> Self {
        self.max_failed_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_attempt_retention_seconds(mut self, seconds: i64) -> Self {
        self.attempt_retention_seconds = seconds;
        self
    }

    #[must_use]
    pub fn credentials(&self) -> &AdminCredentials {
        &self.credentials
    }

    #[must_use]
    pub fn totp_issuer(&self) -> &str {
        &self.totp_issuer
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn max_failed_attempts(&self) -> usize {
        self.max_failed_attempts
    }

    /// Check every setting the guard does arithmetic with.
    ///
    /// # Errors
    /// Returns an error if a duration is outside `1..=MAX_DURATION_SECONDS` or
    /// the attempt limit is zero.
    pub fn validate(&self) -> Result<()> {
        self.session_ttl()?;
        self.lockout_window()?;
        self.attempt_retention()?;
        if self.max_failed_attempts == 0 {
            bail!("max failed attempts must be at least 1");
        }
        Ok(())
    }

    pub(crate) fn session_ttl(&self) -> Result<Duration> {
        bounded_seconds("session TTL", self.session_ttl_seconds)
    }

    pub(crate) fn lockout_window(&self) -> Result<Duration> {
        bounded_seconds("lockout window", self.lockout_window_seconds)
    }

    pub(crate) fn attempt_retention(&self) -> Result<Duration> {
        bounded_seconds("attempt retention", self.attempt_retention_seconds)
    }
}

fn bounded_seconds(name: &str, seconds: i64) -> Result<Duration> {
    if !(1..=MAX_DURATION_SECONDS).contains(&seconds) {
        bail!("{name} must be between 1 and {MAX_DURATION_SECONDS} seconds, got {seconds}");
    }
    Duration::try_seconds(seconds).with_context(|| format!("{name} out of range: {seconds}"))
}
