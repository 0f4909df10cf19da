use crate::guard::CodeVerifier;
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub username: String,
    pub issuer: String,
}

/// Generate a new one-time-code seed for the admin and print it together with
/// the provisioning URI to scan into an authenticator app.
/// # Errors
/// Returns an error if the seed cannot be generated or the labels are invalid.
pub fn execute(args: &Args) -> Result<()> {
    let (seed, verifier) = CodeVerifier::generate(&args.issuer, &args.username)?;
    debug!(username = %args.username, issuer = %args.issuer, "Generated one-time-code seed");

    println!("TUTORGATE_ADMIN_TOTP_SECRET={seed}");
    println!("{}", verifier.provisioning_uri());
    Ok(())
}
