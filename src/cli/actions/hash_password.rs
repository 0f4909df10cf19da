use crate::guard::password;
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct Args {
    pub password: SecretString,
}

/// Print an Argon2id PHC string suitable for `--admin-password-hash`.
/// # Errors
/// Returns an error if hashing fails.
pub fn execute(args: &Args) -> Result<()> {
    let hash = password::hash_password(args.password.expose_secret())?;
    println!("{hash}");
    Ok(())
}
