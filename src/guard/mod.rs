//! Session & rate-limit guard for the admin area.
//!
//! Flow Overview:
//! 1) Reject outright while locked out (≥ max failures inside the lockout window).
//! 2) Check username and the Argon2id password verifier (always both). Any mismatch is one failure.
//! 3) Without a one-time code, ask for one. This is a protocol step, not a failure.
//! 4) Check the code against the previous, current, and next 30 s step.
//! 5) On success issue a session, persist it, and clear the attempt log.
//!
//! State lives in a [`KeyValueStore`] under two keys ([`SESSION_KEY`],
//! [`ATTEMPTS_KEY`]). Unreadable records are logged and treated as absent;
//! the next write replaces them.

pub mod attempts;
pub mod clock;
pub mod config;
pub mod error;
pub mod password;
pub mod session;
pub mod store;
pub mod totp;

pub use attempts::{AttemptLog, LoginAttempt};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AdminCredentials, GuardConfig};
pub use error::GuardError;
pub use session::Session;
pub use store::{ATTEMPTS_KEY, FileStore, KeyValueStore, MemoryStore, SESSION_KEY};
pub use totp::CodeVerifier;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

pub const CODE_REQUIRED_MESSAGE: &str = "Enter the 6-digit code from your authenticator app";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

/// Where the most recent login attempt stands. Ephemeral: never persisted.
///
/// Tracked per guard, not per client; the HTTP service shares one guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoginStage {
    #[default]
    AwaitingCredentials,
    AwaitingCode,
    Authenticated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(Session),
    /// Username and password were right; a one-time code is needed.
    CodeRequired,
    Rejected(GuardError),
}

impl AuthOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Authenticated(_) => LOGIN_SUCCESS_MESSAGE.to_string(),
            Self::CodeRequired => CODE_REQUIRED_MESSAGE.to_string(),
            Self::Rejected(err) => err.to_string(),
        }
    }

    #[must_use]
    pub fn response(&self) -> AuthResponse {
        AuthResponse {
            success: self.is_success(),
            message: self.message(),
            require_one_time_code: matches!(self, Self::CodeRequired).then_some(true),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_one_time_code: Option<bool>,
}

/// Read-only snapshot for display. Minutes are whole minutes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecurityInfo {
    pub is_authenticated: bool,
    pub session_time_remaining: i64,
    pub recent_failed_attempts: usize,
    pub max_attempts_before_lockout: usize,
    pub lockout_time_remaining: i64,
    pub login_stage: LoginStage,
}

pub struct Guard {
    config: GuardConfig,
    codes: CodeVerifier,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    /// One value per guard instance. The HTTP layer shares a single guard, so
    /// this is the stage of the most recent login attempt in the process.
    stage: LoginStage,
}

impl Guard {
    /// # Errors
    /// Returns an error if a configured duration is out of range, or the
    /// password hash or one-time-code seed is invalid.
    pub fn new(
        config: GuardConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate().context("Invalid guard configuration")?;
        let credentials = config.credentials();
        password::validate_hash(credentials.password_hash().expose_secret())
            .context("Invalid admin password hash")?;
        let codes = CodeVerifier::from_base32(
            credentials.totp_secret().expose_secret(),
            config.totp_issuer(),
            credentials.username(),
        )
        .context("Invalid admin one-time-code seed")?;

        Ok(Self {
            config,
            codes,
            store,
            clock,
            stage: LoginStage::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    #[must_use]
    pub fn login_stage(&self) -> LoginStage {
        self.stage
    }

    /// `otpauth://` URI for enrolling the admin's authenticator app.
    #[must_use]
    pub fn provisioning_uri(&self) -> String {
        self.codes.provisioning_uri()
    }

    /// Run one login attempt.
    ///
    /// An empty or whitespace-only code counts as no code.
    ///
    /// The password is verified even when the username is wrong, so both
    /// rejections cost one Argon2 verification.
    ///
    /// # Errors
    /// Only on internal faults (store I/O, RNG, unusable password hash, or an
    /// out-of-range configured duration).
    #[instrument(skip(self, password, one_time_code), fields(stage = ?self.stage))]
    pub fn authenticate(
        &mut self,
        username: &str,
        password: &str,
        one_time_code: Option<&str>,
        origin: Option<&str>,
    ) -> Result<AuthOutcome> {
        let now = self.clock.now();
        let log = self.load_attempts()?;
        let window = self.config.lockout_window()?;
        let max_attempts = self.config.max_failed_attempts();

        if log.is_locked_out(now, window, max_attempts) {
            let minutes = log.lockout_minutes_remaining(now, window, max_attempts);
            warn!(origin, minutes, "Login rejected: lockout active");
            self.stage = LoginStage::AwaitingCredentials;
            return Ok(AuthOutcome::Rejected(GuardError::RateLimited { minutes }));
        }

        let credentials = self.config.credentials();
        let username_matches = username == credentials.username();
        let password_matches =
            password::verify_password(password, credentials.password_hash().expose_secret())?;

        if !username_matches {
            self.record_failure(log, now, origin, "unknown username")?;
            return Ok(AuthOutcome::Rejected(GuardError::InvalidCredentials));
        }

        if !password_matches {
            self.record_failure(log, now, origin, "password mismatch")?;
            return Ok(AuthOutcome::Rejected(GuardError::InvalidCredentials));
        }

        let Some(code) = one_time_code.map(str::trim).filter(|code| !code.is_empty()) else {
            debug!("Password verified, waiting for one-time code");
            self.stage = LoginStage::AwaitingCode;
            return Ok(AuthOutcome::CodeRequired);
        };

        if !totp::well_formed(code) {
            self.record_failure(log, now, origin, "malformed one-time code")?;
            return Ok(AuthOutcome::Rejected(GuardError::InvalidCredentials));
        }

        if !self.codes.check(code, now) {
            self.record_failure(log, now, origin, "one-time code mismatch")?;
            return Ok(AuthOutcome::Rejected(GuardError::InvalidCredentials));
        }

        let session = Session::issue(credentials.username(), now, self.config.session_ttl()?)?;
        self.save_session(&session)?;
        self.store
            .delete(ATTEMPTS_KEY)
            .context("Failed to clear login attempts")?;
        self.stage = LoginStage::Authenticated;

        info!(origin, expires_at = %session.expires_at, "Admin login succeeded");

        Ok(AuthOutcome::Authenticated(session))
    }

    /// Valid session → refresh its activity timestamp. Expired → delete it.
    ///
    /// # Errors
    /// Only on store I/O failure.
    pub fn is_authenticated(&mut self) -> Result<bool> {
        let now = self.clock.now();
        let Some(mut session) = self.load_session()? else {
            return Ok(false);
        };

        if !session.is_valid_at(now) {
            debug!("Session expired, removing it");
            self.clear_session()?;
            return Ok(false);
        }

        session.touch(now);
        self.save_session(&session)?;
        Ok(true)
    }

    /// # Errors
    /// Only on store I/O failure.
    pub fn logout(&mut self) -> Result<()> {
        self.store
            .delete(SESSION_KEY)
            .context("Failed to delete session")?;
        self.stage = LoginStage::AwaitingCredentials;
        info!("Admin logged out");
        Ok(())
    }

    /// Push a live session's expiry to `now + ttl`.
    ///
    /// # Errors
    /// On store I/O failure or an out-of-range configured TTL.
    pub fn extend_session(&mut self) -> Result<bool> {
        let now = self.clock.now();
        let Some(mut session) = self.load_session()? else {
            return Ok(false);
        };

        if !session.is_valid_at(now) {
            self.clear_session()?;
            return Ok(false);
        }

        session.extend(now, self.config.session_ttl()?)?;
        self.save_session(&session)?;
        debug!(expires_at = %session.expires_at, "Session extended");
        Ok(true)
    }

    /// Whole minutes left on the session, zero without a live session.
    ///
    /// # Errors
    /// Only on store I/O failure.
    pub fn session_time_remaining(&self) -> Result<i64> {
        let now = self.clock.now();
        Ok(self
            .load_session()?
            .map_or(0, |session| session.minutes_remaining(now)))
    }

    /// # Errors
    /// Only on store I/O failure.
    pub fn security_info(&self) -> Result<SecurityInfo> {
        let now = self.clock.now();
        let session = self.load_session()?;
        let log = self.load_attempts()?;
        let window = self.config.lockout_window()?;
        let max_attempts = self.config.max_failed_attempts();

        Ok(SecurityInfo {
            is_authenticated: session.as_ref().is_some_and(|s| s.is_valid_at(now)),
            session_time_remaining: session.map_or(0, |s| s.minutes_remaining(now)),
            recent_failed_attempts: log.recent_failures(now, window),
            max_attempts_before_lockout: max_attempts,
            lockout_time_remaining: log.lockout_minutes_remaining(now, window, max_attempts),
            login_stage: self.stage,
        })
    }

    /// `true` iff a session record exists and its id is `token`.
    ///
    /// # Errors
    /// Only on store I/O failure.
    pub fn session_token_matches(&self, token: &str) -> Result<bool> {
        Ok(self.load_session()?.is_some_and(|session| {
            session::hash_session_token(&session.session_id) == session::hash_session_token(token)
        }))
    }

    fn record_failure(
        &mut self,
        mut log: AttemptLog,
        now: DateTime<Utc>,
        origin: Option<&str>,
        reason: &str,
    ) -> Result<()> {
        log.record(LoginAttempt {
            timestamp: now,
            success: false,
            origin: origin.map(ToString::to_string),
        });
        self.save_attempts(log, now)?;
        self.stage = LoginStage::AwaitingCredentials;
        // The reason stays in the logs; callers only see the generic message.
        warn!(origin, reason, "Admin login failed");
        Ok(())
    }

    fn load_session(&self) -> Result<Option<Session>> {
        let Some(raw) = self
            .store
            .get(SESSION_KEY)
            .context("Failed to read session")?
        else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                warn!("{}: {err}", GuardError::corrupt_session());
                Ok(None)
            }
        }
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)?;
        self.store
            .set(SESSION_KEY, &raw)
            .context("Failed to persist session")
    }

    fn clear_session(&self) -> Result<()> {
        self.store
            .delete(SESSION_KEY)
            .context("Failed to delete session")
    }

    fn load_attempts(&self) -> Result<AttemptLog> {
        let Some(raw) = self
            .store
            .get(ATTEMPTS_KEY)
            .context("Failed to read login attempts")?
        else {
            return Ok(AttemptLog::new());
        };
        match serde_json::from_str(&raw) {
            Ok(log) => Ok(log),
            Err(err) => {
                warn!("{}: {err}", GuardError::corrupt_attempts());
                Ok(AttemptLog::new())
            }
        }
    }

    fn save_attempts(&self, mut log: AttemptLog, now: DateTime<Utc>) -> Result<()> {
        log.prune(now, self.config.attempt_retention()?);
        let raw = serde_json::to_string(&log)?;
        self.store
            .set(ATTEMPTS_KEY, &raw)
            .context("Failed to persist login attempts")
    }
}

impl std::fmt::Debug for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard")
            .field("config", &self.config)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;
    use secrecy::SecretString;

    const USERNAME: &str = "admin";
    const PASSWORD: &str = "correct horse battery staple";
    const SEED: &str = "JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP";

    struct Fixture {
        guard: Guard,
        store: Arc<MemoryStore>,
        clock: Arc<ManualClock>,
    }

    impl Fixture {
        fn new() -> Self {
            let hash = password::hash_password_with_params(PASSWORD, password::fast_params())
                .unwrap();
            let credentials = AdminCredentials::new(
                USERNAME.to_string(),
                SecretString::from(hash),
                SecretString::from(SEED.to_string()),
            );
            let store = Arc::new(MemoryStore::new());
            let clock = Arc::new(ManualClock::at_unix(1_700_000_000));
            let guard = Guard::new(GuardConfig::new(credentials), store.clone(), clock.clone())
                .unwrap();
            Self {
                guard,
                store,
                clock,
            }
        }

        fn code(&self) -> String {
            self.guard.codes.code_at(self.clock.now())
        }

        /// A well-formed code outside the accepted steps.
        fn rejected_code(&self) -> String {
            let now = self.clock.now();
            let accepted = [
                self.guard.codes.code_at(now - Duration::seconds(30)),
                self.guard.codes.code_at(now),
                self.guard.codes.code_at(now + Duration::seconds(30)),
            ];
            (0..10)
                .map(|n| format!("{n:06}"))
                .find(|candidate| !accepted.contains(candidate))
                .unwrap()
        }

        fn failures(&self) -> usize {
            self.guard.security_info().unwrap().recent_failed_attempts
        }

        fn login(&mut self) -> AuthOutcome {
            let code = self.code();
            self.guard
                .authenticate(USERNAME, PASSWORD, Some(&code), None)
                .unwrap()
        }
    }

    #[test]
    fn full_login_issues_session() {
        let mut fx = Fixture::new();
        let outcome = fx.login();
        assert!(outcome.is_success());
        assert_eq!(fx.guard.login_stage(), LoginStage::Authenticated);
        assert!(fx.store.get(SESSION_KEY).unwrap().is_some());
        assert!(fx.guard.is_authenticated().unwrap());
        assert_eq!(fx.guard.session_time_remaining().unwrap(), 480);
    }

    #[test]
    fn missing_code_asks_for_one_without_counting() {
        let mut fx = Fixture::new();
        let outcome = fx.guard.authenticate(USERNAME, PASSWORD, None, None).unwrap();
        assert_eq!(outcome, AuthOutcome::CodeRequired);
        assert_eq!(outcome.response().require_one_time_code, Some(true));
        assert!(!outcome.response().success);
        assert_eq!(fx.guard.login_stage(), LoginStage::AwaitingCode);
        assert_eq!(fx.failures(), 0);

        let outcome = fx
            .guard
            .authenticate(USERNAME, PASSWORD, Some("   "), None)
            .unwrap();
        assert_eq!(outcome, AuthOutcome::CodeRequired);
        assert_eq!(fx.failures(), 0);
    }

    #[test]
    fn wrong_username_and_password_share_one_message() {
        let mut fx = Fixture::new();
        let bad_user = fx
            .guard
            .authenticate("someone", PASSWORD, None, None)
            .unwrap();
        let bad_pass = fx.guard.authenticate(USERNAME, "nope", None, None).unwrap();
        assert_eq!(bad_user, bad_pass);
        assert_eq!(bad_user.message(), bad_pass.message());
        assert_eq!(fx.failures(), 2);
    }

    #[test]
    fn wrong_username_still_runs_the_password_verifier() {
        let mut fx = Fixture::new();

        let before = password::verifications();
        fx.guard.authenticate("nobody", "x", None, None).unwrap();
        assert_eq!(password::verifications() - before, 1);

        let before = password::verifications();
        fx.guard.authenticate(USERNAME, "x", None, None).unwrap();
        assert_eq!(password::verifications() - before, 1);

        // Locked out: neither factor is checked.
        for _ in 0..3 {
            fx.guard.authenticate("nobody", "x", None, None).unwrap();
        }
        let before = password::verifications();
        fx.guard.authenticate("nobody", "x", None, None).unwrap();
        assert_eq!(password::verifications(), before);
    }

    #[test]
    fn out_of_range_ttl_is_rejected_at_construction() {
        let hash =
            password::hash_password_with_params(PASSWORD, password::fast_params()).unwrap();
        let credentials = AdminCredentials::new(
            USERNAME.to_string(),
            SecretString::from(hash),
            SecretString::from(SEED.to_string()),
        );
        let config = GuardConfig::new(credentials).with_session_ttl_seconds(i64::MAX);
        let result = Guard::new(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::at_unix(1_700_000_000)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn security_info_reports_login_stage() {
        let mut fx = Fixture::new();
        fx.guard.authenticate(USERNAME, PASSWORD, None, None).unwrap();
        assert_eq!(
            fx.guard.security_info().unwrap().login_stage,
            LoginStage::AwaitingCode
        );
        assert!(fx.login().is_success());
        assert_eq!(
            fx.guard.security_info().unwrap().login_stage,
            LoginStage::Authenticated
        );
    }

    #[test]
    fn wrong_or_malformed_code_counts_as_failure() {
        let mut fx = Fixture::new();
        let wrong = fx.rejected_code();
        let outcome = fx
            .guard
            .authenticate(USERNAME, PASSWORD, Some(&wrong), None)
            .unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Rejected(GuardError::InvalidCredentials)
        );
        assert_eq!(fx.guard.login_stage(), LoginStage::AwaitingCredentials);

        let outcome = fx
            .guard
            .authenticate(USERNAME, PASSWORD, Some("12ab56"), None)
            .unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Rejected(GuardError::InvalidCredentials)
        );
        assert_eq!(fx.failures(), 2);
    }

    #[test]
    fn lockout_after_five_failures_even_with_good_credentials() {
        let mut fx = Fixture::new();
        for _ in 0..5 {
            fx.guard.authenticate(USERNAME, "wrong", None, None).unwrap();
            fx.clock.advance(Duration::seconds(10));
        }
        let outcome = fx.login();
        assert!(matches!(
            outcome,
            AuthOutcome::Rejected(GuardError::RateLimited { minutes }) if minutes > 0
        ));
        // No attempt slot consumed while locked out.
        assert_eq!(fx.failures(), 5);
        assert!(fx.guard.security_info().unwrap().lockout_time_remaining > 0);
    }

    #[test]
    fn lockout_heals_once_oldest_failure_ages_out() {
        let mut fx = Fixture::new();
        for _ in 0..5 {
            fx.guard.authenticate(USERNAME, "wrong", None, None).unwrap();
            fx.clock.advance(Duration::minutes(1));
        }
        // Oldest failure was at t0; the window is 30 minutes.
        fx.clock.set(
            DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap() + Duration::minutes(29),
        );
        assert!(matches!(
            fx.login(),
            AuthOutcome::Rejected(GuardError::RateLimited { .. })
        ));

        fx.clock.set(
            DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap() + Duration::minutes(30),
        );
        assert!(fx.login().is_success());
        assert_eq!(fx.failures(), 0);
        assert_eq!(fx.store.get(ATTEMPTS_KEY).unwrap(), None);
    }

    #[test]
    fn expired_session_is_deleted() {
        let mut fx = Fixture::new();
        assert!(fx.login().is_success());

        fx.clock
            .advance(Duration::hours(8) - Duration::milliseconds(1));
        assert!(fx.guard.is_authenticated().unwrap());

        fx.clock.advance(Duration::milliseconds(1));
        assert!(!fx.guard.is_authenticated().unwrap());
        assert_eq!(fx.store.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn is_authenticated_refreshes_activity() {
        let mut fx = Fixture::new();
        assert!(fx.login().is_success());
        fx.clock.advance(Duration::minutes(5));
        assert!(fx.guard.is_authenticated().unwrap());

        let raw = fx.store.get(SESSION_KEY).unwrap().unwrap();
        let session: Session = serde_json::from_str(&raw).unwrap();
        assert_eq!(session.last_activity, fx.clock.now());
        assert_eq!(session.expires_at, session.created_at + Duration::hours(8));
    }

    #[test]
    fn logout_clears_session_and_stage() {
        let mut fx = Fixture::new();
        assert!(fx.login().is_success());
        fx.guard.logout().unwrap();
        assert!(!fx.guard.is_authenticated().unwrap());
        assert_eq!(fx.guard.login_stage(), LoginStage::AwaitingCredentials);
        assert_eq!(fx.guard.session_time_remaining().unwrap(), 0);
    }

    #[test]
    fn extend_session_resets_expiry() {
        let mut fx = Fixture::new();
        assert!(!fx.guard.extend_session().unwrap());

        assert!(fx.login().is_success());
        fx.clock.advance(Duration::hours(7));
        assert_eq!(fx.guard.session_time_remaining().unwrap(), 60);
        assert!(fx.guard.extend_session().unwrap());
        assert_eq!(fx.guard.session_time_remaining().unwrap(), 480);
    }

    #[test]
    fn extend_session_refuses_expired_record() {
        let mut fx = Fixture::new();
        assert!(fx.login().is_success());
        fx.clock.advance(Duration::hours(9));
        assert!(!fx.guard.extend_session().unwrap());
        assert_eq!(fx.store.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_records_are_treated_as_absent() {
        let mut fx = Fixture::new();
        fx.store.set(SESSION_KEY, "{not json").unwrap();
        fx.store.set(ATTEMPTS_KEY, "garbage").unwrap();

        assert!(!fx.guard.is_authenticated().unwrap());
        assert_eq!(fx.failures(), 0);

        // The next write replaces the broken log.
        fx.guard.authenticate(USERNAME, "wrong", None, None).unwrap();
        let raw = fx.store.get(ATTEMPTS_KEY).unwrap().unwrap();
        let log: AttemptLog = serde_json::from_str(&raw).unwrap();
        assert_eq!(log.attempts().len(), 1);
    }

    #[test]
    fn failure_records_origin_and_prunes_old_entries() {
        let mut fx = Fixture::new();
        fx.guard
            .authenticate("nobody", "x", None, Some("203.0.113.7"))
            .unwrap();
        fx.clock.advance(Duration::hours(25));
        fx.guard.authenticate("nobody", "x", None, None).unwrap();

        let raw = fx.store.get(ATTEMPTS_KEY).unwrap().unwrap();
        let log: AttemptLog = serde_json::from_str(&raw).unwrap();
        assert_eq!(log.attempts().len(), 1);
        assert_eq!(log.attempts()[0].origin, None);
    }

    #[test]
    fn session_token_matches_only_issued_token() {
        let mut fx = Fixture::new();
        assert!(!fx.guard.session_token_matches("anything").unwrap());

        let AuthOutcome::Authenticated(session) = fx.login() else {
            panic!("login failed");
        };
        assert!(fx.guard.session_token_matches(&session.session_id).unwrap());
        assert!(!fx.guard.session_token_matches("forged").unwrap());
    }

    #[test]
    fn security_info_snapshot() {
        let mut fx = Fixture::new();
        fx.guard.authenticate(USERNAME, "wrong", None, None).unwrap();
        let info = fx.guard.security_info().unwrap();
        assert_eq!(
            info,
            SecurityInfo {
                is_authenticated: false,
                session_time_remaining: 0,
                recent_failed_attempts: 1,
                max_attempts_before_lockout: 5,
                lockout_time_remaining: 0,
                login_stage: LoginStage::AwaitingCredentials,
            }
        );
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let credentials = AdminCredentials::new(
            USERNAME.to_string(),
            SecretString::from("plain-text".to_string()),
            SecretString::from(SEED.to_string()),
        );
        let result = Guard::new(
            GuardConfig::new(credentials),
            Arc::new(MemoryStore::new()),
            Arc::new(SystemClock),
        );
        assert!(result.is_err());
    }
}
