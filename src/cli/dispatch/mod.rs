use crate::cli::{
    actions::{hash, inspect, verify, Action},
    commands::{scrypt, ARG_CREDENTIAL, CMD_HASH, CMD_INSPECT, CMD_VERIFY},
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;

fn credential(matches: &ArgMatches) -> Result<String> {
    matches
        .get_one::<String>(ARG_CREDENTIAL)
        .cloned()
        .context("missing required argument: --credential")
}

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((CMD_HASH, sub_m)) => Ok(Action::Hash(hash::Args {
            config: scrypt::parse_config(sub_m)?,
        })),
        Some((CMD_VERIFY, sub_m)) => Ok(Action::Verify(verify::Args {
            credential: credential(sub_m)?,
        })),
        Some((CMD_INSPECT, sub_m)) => Ok(Action::Inspect(inspect::Args {
            credential: credential(sub_m)?,
        })),
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("no subcommand given")),
    }
}
