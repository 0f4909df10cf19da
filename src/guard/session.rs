//! Admin session record and token helpers.

use anyhow::{Context, Result};
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Persisted under [`super::store::SESSION_KEY`]. Timestamps are epoch milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub username: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_activity: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
    pub authenticated: bool,
}

impl Session {
    /// # Errors
    /// Returns an error if the OS random source fails or `now + ttl` is not a
    /// representable instant.
    pub fn issue(username: &str, now: DateTime<Utc>, ttl: Duration) -> Result<Self> {
        Ok(Self {
            session_id: generate_session_token()?,
            username: username.to_string(),
            created_at: now,
            last_activity: now,
            expires_at: expiry(now, ttl)?,
            authenticated: true,
        })
    }

    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.authenticated && now < self.expires_at
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }

    /// # Errors
    /// Returns an error if `now + ttl` is not a representable instant; the
    /// session is left unchanged.
    pub fn extend(&mut self, now: DateTime<Utc>, ttl: Duration) -> Result<()> {
        self.expires_at = expiry(now, ttl)?;
        self.last_activity = now;
        Ok(())
    }

    /// Whole minutes left, rounded down; zero once expired.
    #[must_use]
    pub fn minutes_remaining(&self, now: DateTime<Utc>) -> i64 {
        if !self.is_valid_at(now) {
            return 0;
        }
        (self.expires_at - now).num_milliseconds() / 60_000
    }
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>> {
    now.checked_add_signed(ttl)
        .context("session expiry is out of range")
}

/// Create a new opaque session token (256 bits, URL-safe base64).
pub(crate) fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

/// Tokens are compared through their digests rather than byte by byte.
pub(crate) fn hash_session_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(seconds, 0).unwrap()
    }

    #[test]
    fn issue_sets_expiry_from_creation() {
        let now = at(1_700_000_000);
        let session = Session::issue("admin", now, Duration::hours(8)).unwrap();
        assert_eq!(session.created_at, now);
        assert_eq!(session.last_activity, now);
        assert_eq!(session.expires_at, now + Duration::hours(8));
        assert!(session.authenticated);
        assert_eq!(session.username, "admin");
    }

    #[test]
    fn validity_ends_at_expiry() {
        let now = at(1_700_000_000);
        let session = Session::issue("admin", now, Duration::minutes(10)).unwrap();
        assert!(session.is_valid_at(now + Duration::minutes(10) - Duration::milliseconds(1)));
        assert!(!session.is_valid_at(now + Duration::minutes(10)));
    }

    #[test]
    fn unauthenticated_record_is_not_valid() {
        let now = at(1_700_000_000);
        let mut session = Session::issue("admin", now, Duration::hours(1)).unwrap();
        session.authenticated = false;
        assert!(!session.is_valid_at(now));
        assert_eq!(session.minutes_remaining(now), 0);
    }

    #[test]
    fn minutes_remaining_rounds_down() {
        let now = at(1_700_000_000);
        let session = Session::issue("admin", now, Duration::hours(8)).unwrap();
        assert_eq!(session.minutes_remaining(now), 480);
        assert_eq!(session.minutes_remaining(now + Duration::seconds(1)), 479);
        assert_eq!(session.minutes_remaining(now + Duration::hours(9)), 0);
    }

    #[test]
    fn extend_pushes_expiry_from_now() {
        let now = at(1_700_000_000);
        let mut session = Session::issue("admin", now, Duration::hours(8)).unwrap();
        let later = now + Duration::hours(2);
        session.extend(later, Duration::hours(8)).unwrap();
        assert_eq!(session.expires_at, later + Duration::hours(8));
        assert_eq!(session.last_activity, later);
        assert_eq!(session.created_at, now);
    }

    #[test]
    fn unrepresentable_expiry_is_an_error() {
        let now = at(1_700_000_000);
        let ttl = Duration::milliseconds(i64::MAX);
        assert!(Session::issue("admin", now, ttl).is_err());

        let mut session = Session::issue("admin", now, Duration::hours(8)).unwrap();
        let later = now + Duration::hours(1);
        assert!(session.extend(later, ttl).is_err());
        assert_eq!(session.expires_at, now + Duration::hours(8));
        assert_eq!(session.last_activity, now);
    }

    #[test]
    fn serializes_camel_case_millis() {
        let now = at(1_700_000_000);
        let session = Session::issue("admin", now, Duration::hours(8)).unwrap();
        let json: serde_json::Value = serde_json::to_value(&session).unwrap();
        assert_eq!(json["createdAt"], serde_json::json!(1_700_000_000_000_i64));
        assert_eq!(json["expiresAt"], serde_json::json!(1_700_028_800_000_i64));
        assert_eq!(json["authenticated"], serde_json::json!(true));
        assert!(json.get("sessionId").is_some());
    }

    #[test]
    fn generate_session_token_is_32_bytes() {
        let decoded_len = generate_session_token()
            .ok()
            .and_then(|token| URL_SAFE_NO_PAD.decode(token.as_bytes()).ok())
            .map(|bytes| bytes.len());
        assert_eq!(decoded_len, Some(32));
    }

    #[test]
    fn hash_session_token_stable() {
        assert_eq!(hash_session_token("token"), hash_session_token("token"));
        assert_ne!(hash_session_token("token"), hash_session_token("other"));
    }
}
