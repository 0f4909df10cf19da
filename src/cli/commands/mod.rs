pub mod guard;
pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_HASH_PASSWORD: &str = "hash-password";
pub const CMD_ENROLL: &str = "enroll";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("tutorgate")
        .about("Admin session and rate-limit guard")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_negates_reqs(true)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("TUTORGATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("frontend-base-url")
                .long("frontend-base-url")
                .help("Admin dashboard base URL, used for CORS and cookie security")
                .env("TUTORGATE_FRONTEND_BASE_URL")
                .default_value("http://localhost:5173"),
        )
        .subcommand(hash_password_command())
        .subcommand(enroll_command());

    let command = guard::with_args(command);
    logging::with_args(command)
}

fn hash_password_command() -> Command {
    Command::new(CMD_HASH_PASSWORD)
        .about("Print an Argon2id hash for --admin-password-hash")
        .arg(
            Arg::new("password")
                .long("password")
                .help("Password to hash")
                .env("TUTORGATE_ADMIN_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
}

fn enroll_command() -> Command {
    Command::new(CMD_ENROLL)
        .about("Generate a one-time-code seed and its provisioning URI")
        .arg(
            Arg::new("username")
                .long("username")
                .help("Account label shown by authenticator apps")
                .env("TUTORGATE_ADMIN_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new("issuer")
                .long("issuer")
                .help("Issuer label shown by authenticator apps")
                .env("TUTORGATE_TOTP_ISSUER")
                .default_value("Tutorgate"),
        )
}
