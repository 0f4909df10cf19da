use super::store::{ATTEMPTS_KEY, SESSION_KEY};

/// Rejections surfaced to the caller. The messages are safe to display: they
/// never say which factor failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("Invalid username, password, or authentication code")]
    InvalidCredentials,
    #[error("Too many failed login attempts. Please try again in {minutes} minute(s).")]
    RateLimited { minutes: i64 },
    /// Never returned from the public API; unreadable records are logged and
    /// treated as absent.
    #[error("Stored {key} record is unreadable, ignoring it")]
    StorageCorrupt { key: &'static str },
}

impl GuardError {
    pub(crate) const fn corrupt_session() -> Self {
        Self::StorageCorrupt { key: SESSION_KEY }
    }

    pub(crate) const fn corrupt_attempts() -> Self {
        Self::StorageCorrupt { key: ATTEMPTS_KEY }
    }
}
