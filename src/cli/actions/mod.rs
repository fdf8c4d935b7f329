pub mod hash;
pub mod inspect;
pub mod verify;

// Internal "interpreter" for `Action`.
mod run;

use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use std::io::BufRead;

#[derive(Debug)]
pub enum Action {
    Hash(hash::Args),
    Verify(verify::Args),
    Inspect(inspect::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Read one line from `reader` as the password, without its line ending.
///
/// An empty line is an empty password; a closed stream with no input is an
/// error.
///
/// # Errors
/// Returns an error if reading fails or nothing was read.
pub fn read_password<R: BufRead>(mut reader: R) -> Result<SecretString> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    if read == 0 {
        bail!("no password given on stdin");
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(SecretString::from(line))
}
