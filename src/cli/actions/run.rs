use crate::cli::actions::{Action, enroll, hash_password, server};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Server(args) => server::execute(args).await,
        Action::HashPassword(args) => hash_password::execute(&args),
        Action::Enroll(args) => enroll::execute(&args),
    }
}
