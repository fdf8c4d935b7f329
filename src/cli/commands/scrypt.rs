use crate::password::{Algorithm, Config, ScryptParams};
use anyhow::{Context, Result};
use clap::{builder::PossibleValuesParser, Arg, ArgMatches, Command};

pub const ARG_ALGORITHM: &str = "algorithm";
pub const ARG_SCRYPT_N: &str = "scrypt-n";
pub const ARG_SCRYPT_R: &str = "scrypt-r";
pub const ARG_SCRYPT_P: &str = "scrypt-p";
pub const ARG_SCRYPT_LEN: &str = "scrypt-len";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ALGORITHM)
                .long(ARG_ALGORITHM)
                .help("Hashing scheme for new credentials")
                .env("PASSCRYPT_ALGORITHM")
                .default_value(Algorithm::default().id())
                .value_parser(PossibleValuesParser::new(
                    Algorithm::ALL.iter().map(|algorithm| algorithm.id()),
                )),
        )
        .arg(
            Arg::new(ARG_SCRYPT_N)
                .long(ARG_SCRYPT_N)
                .help("scrypt CPU/memory cost, a power of two")
                .env("PASSCRYPT_SCRYPT_N")
                .default_value("32768")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_SCRYPT_R)
                .long(ARG_SCRYPT_R)
                .help("scrypt block size")
                .env("PASSCRYPT_SCRYPT_R")
                .default_value("8")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new(ARG_SCRYPT_P)
                .long(ARG_SCRYPT_P)
                .help("scrypt parallelization factor")
                .env("PASSCRYPT_SCRYPT_P")
                .default_value("1")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new(ARG_SCRYPT_LEN)
                .long(ARG_SCRYPT_LEN)
                .help("Salt and derived key length in bytes")
                .env("PASSCRYPT_SCRYPT_LEN")
                .default_value("32")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

/// Build the hashing configuration from parsed arguments.
///
/// # Errors
/// Returns an error if an argument is missing or out of range.
pub fn parse_config(matches: &ArgMatches) -> Result<Config> {
    let algorithm = matches
        .get_one::<String>(ARG_ALGORITHM)
        .context("missing required argument: --algorithm")?
        .parse::<Algorithm>()?;

    let n = matches
        .get_one::<u64>(ARG_SCRYPT_N)
        .copied()
        .unwrap_or(ScryptParams::DEFAULT_N);
    let r = matches
        .get_one::<u32>(ARG_SCRYPT_R)
        .copied()
        .unwrap_or(ScryptParams::DEFAULT_R);
    let p = matches
        .get_one::<u32>(ARG_SCRYPT_P)
        .copied()
        .unwrap_or(ScryptParams::DEFAULT_P);
    let len = matches
        .get_one::<u64>(ARG_SCRYPT_LEN)
        .copied()
        .map(usize::try_from)
        .transpose()
        .context("--scrypt-len does not fit in memory")?
        .unwrap_or(ScryptParams::DEFAULT_LEN);

    Ok(Config::new(algorithm, ScryptParams::new(n, r, p, len)))
}
