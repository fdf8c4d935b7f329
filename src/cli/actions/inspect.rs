use crate::password;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct Args {
    pub credential: String,
}

/// Public view of a stored credential. Salt and hash are left out.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub id: String,
    pub params: BTreeMap<&'static str, u64>,
}

/// # Errors
/// Returns an error if the credential does not decode.
pub fn summarize(credential: &str) -> Result<Summary> {
    let crypter = password::from_encoded(credential).context("invalid credential")?;

    Ok(Summary {
        id: crypter.id().to_string(),
        params: crypter.parameters().into_iter().collect(),
    })
}

/// Print the credential's scheme and parameters as JSON.
/// # Errors
/// Returns an error if the credential does not decode.
pub fn execute(args: &Args) -> Result<()> {
    let summary = summarize(&args.credential)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
