use crate::{
    api::{self, handlers::AdminState},
    guard::{AdminCredentials, FileStore, Guard, GuardConfig, SystemClock},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{path::PathBuf, sync::Arc};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub frontend_base_url: String,
    pub store_dir: PathBuf,
    pub admin_username: String,
    pub admin_password_hash: SecretString,
    pub admin_totp_secret: SecretString,
    pub totp_issuer: String,
    pub session_ttl_seconds: i64,
    pub lockout_window_seconds: i64,
    pub max_failed_attempts: usize,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the store cannot be opened, the configured credentials
/// are malformed, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let cookie_secure = args.frontend_base_url.starts_with("https://");
    let frontend_base_url = args.frontend_base_url.clone();
    let port = args.port;

    let store = FileStore::open(&args.store_dir)
        .with_context(|| format!("Could not open store at {}", args.store_dir.display()))?;
    let guard = Guard::new(guard_config(args), Arc::new(store), Arc::new(SystemClock))
        .context("Invalid admin credentials configuration")?;

    let state = Arc::new(AdminState::new(guard, cookie_secure));

    api::new(port, &frontend_base_url, state).await
}

fn guard_config(args: Args) -> GuardConfig {
    let credentials = AdminCredentials::new(
        args.admin_username,
        args.admin_password_hash,
        args.admin_totp_secret,
    );
    GuardConfig::new(credentials)
        .with_totp_issuer(args.totp_issuer)
        .with_session_ttl_seconds(args.session_ttl_seconds)
        .with_lockout_window_seconds(args.lockout_window_seconds)
        .with_max_failed_attempts(args.max_failed_attempts)
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("frontend_base_url", args.frontend_base_url.clone()),
        ("store_dir", args.store_dir.display().to_string()),
        ("admin_username", args.admin_username.clone()),
        ("totp_issuer", args.totp_issuer.clone()),
        ("session_ttl_seconds", args.session_ttl_seconds.to_string()),
        (
            "lockout_window_seconds",
            args.lockout_window_seconds.to_string(),
        ),
        ("max_failed_attempts", args.max_failed_attempts.to_string()),
    ];
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "tutorgate {} - {}\n\nStartup configuration:",
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}
