use crate::cli::{
    actions::{Action, enroll, hash_password, server},
    commands::{CMD_ENROLL, CMD_HASH_PASSWORD, guard},
};
use anyhow::{Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

/// Turn parsed arguments into the action to run.
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((CMD_HASH_PASSWORD, sub_m)) => Ok(Action::HashPassword(hash_password::Args {
            password: SecretString::from(required(sub_m, "password")?),
        })),
        Some((CMD_ENROLL, sub_m)) => Ok(Action::Enroll(enroll::Args {
            username: required(sub_m, "username")?,
            issuer: required(sub_m, "issuer")?,
        })),
        _ => server_args(matches).map(Action::Server),
    }
}

fn server_args(matches: &ArgMatches) -> Result<server::Args> {
    let max_failed_attempts = matches
        .get_one::<u32>(guard::ARG_MAX_FAILED_ATTEMPTS)
        .copied()
        .unwrap_or(5);

    Ok(server::Args {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        frontend_base_url: required(matches, "frontend-base-url")?,
        store_dir: required(matches, guard::ARG_STORE_DIR)?.into(),
        admin_username: required(matches, guard::ARG_ADMIN_USERNAME)?,
        admin_password_hash: SecretString::from(required(
            matches,
            guard::ARG_ADMIN_PASSWORD_HASH,
        )?),
        admin_totp_secret: SecretString::from(required(matches, guard::ARG_ADMIN_TOTP_SECRET)?),
        totp_issuer: required(matches, guard::ARG_TOTP_ISSUER)?,
        session_ttl_seconds: matches
            .get_one::<i64>(guard::ARG_SESSION_TTL_SECONDS)
            .copied()
            .unwrap_or(28_800),
        lockout_window_seconds: matches
            .get_one::<i64>(guard::ARG_LOCKOUT_WINDOW_SECONDS)
            .copied()
            .unwrap_or(1_800),
        max_failed_attempts: usize::try_from(max_failed_attempts)
            .context("max-failed-attempts does not fit in usize")?,
    })
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}
