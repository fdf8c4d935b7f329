use crate::cli::actions::read_password;
use crate::password::{self, worker};
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use tracing::{error, info, warn};

#[derive(Debug)]
pub struct Args {
    pub credential: String,
}

/// Verify the password read from stdin against the stored credential.
/// # Errors
/// Returns an error if the password does not match or the credential is unusable.
pub async fn execute(args: Args) -> Result<()> {
    let password = read_password(std::io::stdin().lock())?;
    verify(args, password).await?;
    println!("ok");
    Ok(())
}

/// # Errors
/// A wrong password yields "password does not match"; anything else means the
/// stored credential could not be checked at all.
pub async fn verify(args: Args, password: SecretString) -> Result<()> {
    match worker::verify_password_blocking(args.credential, password).await {
        Ok(()) => {
            info!("password verified");
            Ok(())
        }
        Err(e) => match e.downcast_ref::<password::Error>() {
            Some(engine) if engine.is_mismatch() => {
                warn!("password mismatch");
                Err(anyhow!("password does not match"))
            }
            Some(engine) => {
                error!(kind = ?engine.kind(), "stored credential rejected: {engine}");
                Err(e.context("stored credential could not be verified"))
            }
            None => Err(e),
        },
    }
}
