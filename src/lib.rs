//! # Tutorgate (Admin Session & Rate-Limit Guard)
//!
//! `tutorgate` gates the administrative area of the tutoring-center dashboard
//! behind a single configured admin identity.
//!
//! ## Login
//!
//! A login needs the username, the password (verified against an Argon2id PHC
//! string), and a 6-digit time-based one-time code (RFC 6238, 30 second steps,
//! one step of tolerance either side). Submitting only username and password
//! asks for the code without counting as a failure.
//!
//! Error messages never reveal which factor failed.
//!
//! ## Sessions
//!
//! A successful login issues one opaque session token valid for 8 hours. Only
//! one admin session exists at a time; it is persisted under the
//! `admin_session` key and can be extended or ended with logout.
//!
//! ## Throttling
//!
//! Failed attempts are kept under `login_attempts` for 24 hours. Five failures
//! within 30 minutes lock out every login, even a correct one, until the
//! failures age out of the window.

pub mod api;
pub mod cli;
pub mod guard;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
