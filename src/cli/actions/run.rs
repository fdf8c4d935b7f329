use crate::cli::actions::{hash, inspect, verify, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Hash(args) => hash::execute(args).await,
        Action::Verify(args) => verify::execute(args).await,
        Action::Inspect(args) => inspect::execute(&args),
    }
}
