//! Rolling login attempt log and lockout arithmetic.
//!
//! Lockout is derived, never stored: the guard is locked while the number of
//! failures inside the lockout window is at least the configured maximum. It
//! lifts on its own as failures age out; there is no unlock action.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One authentication outcome. `timestamp` is epoch milliseconds on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginAttempt {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    #[serde(default)]
    pub origin: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptLog {
    attempts: Vec<LoginAttempt>,
}

impl AttemptLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn attempts(&self) -> &[LoginAttempt] {
        &self.attempts
    }

    pub fn record(&mut self, attempt: LoginAttempt) {
        self.attempts.push(attempt);
    }

    /// Drop everything older than `retention`.
    pub fn prune(&mut self, now: DateTime<Utc>, retention: Duration) {
        let cutoff = cutoff(now, retention);
        self.attempts.retain(|attempt| attempt.timestamp > cutoff);
    }

    /// Failures with `timestamp > now - window`, oldest first.
    fn failures_in_window(
        &self,
        now: DateTime<Utc>,
        window: Duration,
    ) -> impl Iterator<Item = &LoginAttempt> {
        let cutoff = cutoff(now, window);
        self.attempts
            .iter()
            .filter(move |attempt| !attempt.success && attempt.timestamp > cutoff)
    }

    #[must_use]
    pub fn recent_failures(&self, now: DateTime<Utc>, window: Duration) -> usize {
        self.failures_in_window(now, window).count()
    }

    #[must_use]
    pub fn is_locked_out(&self, now: DateTime<Utc>, window: Duration, max_attempts: usize) -> bool {
        self.recent_failures(now, window) >= max_attempts
    }

    /// Minutes (rounded up) until the most recent qualifying failure leaves the
    /// window; zero when not locked out.
    #[must_use]
    pub fn lockout_minutes_remaining(
        &self,
        now: DateTime<Utc>,
        window: Duration,
        max_attempts: usize,
    ) -> i64 {
        if !self.is_locked_out(now, window, max_attempts) {
            return 0;
        }
        let Some(latest) = self
            .failures_in_window(now, window)
            .map(|attempt| attempt.timestamp)
            .max()
        else {
            return 0;
        };
        let remaining_ms = (latest - cutoff(now, window)).num_milliseconds();
        if remaining_ms <= 0 {
            0
        } else {
            (remaining_ms + 59_999) / 60_000
        }
    }
}

/// `now - span`, saturating at the earliest representable instant.
fn cutoff(now: DateTime<Utc>, span: Duration) -> DateTime<Utc> {
    now.checked_sub_signed(span)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(seconds, 0).unwrap()
    }

    fn failure(timestamp: DateTime<Utc>) -> LoginAttempt {
        LoginAttempt {
            timestamp,
            success: false,
            origin: None,
        }
    }

    const WINDOW_MIN: i64 = 30;

    #[test]
    fn counts_only_failures_inside_window() {
        let now = at(1_700_000_000);
        let mut log = AttemptLog::new();
        log.record(failure(now - Duration::minutes(31)));
        log.record(failure(now - Duration::minutes(5)));
        log.record(LoginAttempt {
            timestamp: now - Duration::minutes(4),
            success: true,
            origin: Some("10.0.0.1".to_string()),
        });
        log.record(failure(now));

        assert_eq!(log.recent_failures(now, Duration::minutes(WINDOW_MIN)), 2);
    }

    #[test]
    fn lockout_triggers_at_max_and_heals() {
        let start = at(1_700_000_000);
        let window = Duration::minutes(WINDOW_MIN);
        let mut log = AttemptLog::new();
        for i in 0..5 {
            log.record(failure(start + Duration::minutes(i)));
        }
        let now = start + Duration::minutes(4);
        assert!(log.is_locked_out(now, window, 5));
        assert!(!log.is_locked_out(now, window, 6));

        // Oldest failure leaves the window, four remain.
        let later = start + window;
        assert!(!log.is_locked_out(later, window, 5));
    }

    #[test]
    fn lockout_remaining_tracks_latest_failure() {
        let start = at(1_700_000_000);
        let window = Duration::minutes(WINDOW_MIN);
        let mut log = AttemptLog::new();
        for i in 0..5 {
            log.record(failure(start + Duration::minutes(i)));
        }
        let now = start + Duration::minutes(4);
        assert_eq!(log.lockout_minutes_remaining(now, window, 5), 30);

        let now = now + Duration::seconds(30);
        assert_eq!(log.lockout_minutes_remaining(now, window, 5), 30);

        let now = now + Duration::minutes(1);
        assert_eq!(log.lockout_minutes_remaining(now, window, 5), 29);
    }

    #[test]
    fn lockout_remaining_zero_when_unlocked() {
        let now = at(1_700_000_000);
        let mut log = AttemptLog::new();
        log.record(failure(now));
        assert_eq!(
            log.lockout_minutes_remaining(now, Duration::minutes(WINDOW_MIN), 5),
            0
        );
    }

    #[test]
    fn window_reaching_before_epoch_range_saturates() {
        let now = at(1_700_000_000);
        let mut log = AttemptLog::new();
        log.record(failure(now));
        let window = Duration::milliseconds(i64::MAX);
        assert_eq!(log.recent_failures(now, window), 1);
        assert!(log.is_locked_out(now, window, 1));
        assert!(log.lockout_minutes_remaining(now, window, 1) > 0);
        log.prune(now, window);
        assert_eq!(log.attempts().len(), 1);
    }

    #[test]
    fn prune_keeps_last_day() {
        let now = at(1_700_000_000);
        let mut log = AttemptLog::new();
        log.record(failure(now - Duration::hours(25)));
        log.record(failure(now - Duration::hours(23)));
        log.prune(now, Duration::hours(24));
        assert_eq!(log.attempts().len(), 1);
        assert_eq!(log.attempts()[0].timestamp, now - Duration::hours(23));
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut log = AttemptLog::new();
        log.record(failure(at(1_700_000_000)));
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(
            json,
            r#"[{"timestamp":1700000000000,"success":false,"origin":null}]"#
        );
        let parsed: AttemptLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, log);
    }
}
