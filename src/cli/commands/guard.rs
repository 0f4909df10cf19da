use crate::guard::config::MAX_DURATION_SECONDS;
use clap::{Arg, Command};

pub const ARG_STORE_DIR: &str = "store-dir";
pub const ARG_ADMIN_USERNAME: &str = "admin-username";
pub const ARG_ADMIN_PASSWORD_HASH: &str = "admin-password-hash";
pub const ARG_ADMIN_TOTP_SECRET: &str = "admin-totp-secret";
pub const ARG_TOTP_ISSUER: &str = "totp-issuer";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";
pub const ARG_LOCKOUT_WINDOW_SECONDS: &str = "lockout-window-seconds";
pub const ARG_MAX_FAILED_ATTEMPTS: &str = "max-failed-attempts";

#[must_use]
pub fn with_args(command: Command) -> Command {
    let command = with_identity_args(command);
    with_policy_args(command)
}

fn with_identity_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_STORE_DIR)
                .long(ARG_STORE_DIR)
                .help("Directory holding the persisted session and login attempts")
                .env("TUTORGATE_STORE_DIR")
                .default_value("./tutorgate-data"),
        )
        .arg(
            Arg::new(ARG_ADMIN_USERNAME)
                .long(ARG_ADMIN_USERNAME)
                .help("Admin username")
                .env("TUTORGATE_ADMIN_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new(ARG_ADMIN_PASSWORD_HASH)
                .long(ARG_ADMIN_PASSWORD_HASH)
                .help("Argon2id PHC string of the admin password, see `hash-password`")
                .env("TUTORGATE_ADMIN_PASSWORD_HASH")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_ADMIN_TOTP_SECRET)
                .long(ARG_ADMIN_TOTP_SECRET)
                .help("Base32 one-time-code seed, see `enroll`")
                .env("TUTORGATE_ADMIN_TOTP_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOTP_ISSUER)
                .long(ARG_TOTP_ISSUER)
                .help("Issuer label shown by authenticator apps")
                .env("TUTORGATE_TOTP_ISSUER")
                .default_value("Tutorgate"),
        )
}

fn with_policy_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Admin session lifetime in seconds")
                .env("TUTORGATE_SESSION_TTL_SECONDS")
                .default_value("28800")
                .value_parser(clap::value_parser!(i64).range(60..=MAX_DURATION_SECONDS)),
        )
        .arg(
            Arg::new(ARG_LOCKOUT_WINDOW_SECONDS)
                .long(ARG_LOCKOUT_WINDOW_SECONDS)
                .help("Window over which failed logins are counted, in seconds")
                .env("TUTORGATE_LOCKOUT_WINDOW_SECONDS")
                .default_value("1800")
                .value_parser(clap::value_parser!(i64).range(60..=MAX_DURATION_SECONDS)),
        )
        .arg(
            Arg::new(ARG_MAX_FAILED_ATTEMPTS)
                .long(ARG_MAX_FAILED_ATTEMPTS)
                .help("Failed logins within the window that trigger a lockout")
                .env("TUTORGATE_MAX_FAILED_ATTEMPTS")
                .default_value("5")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
}
