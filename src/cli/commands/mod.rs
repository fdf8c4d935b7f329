pub mod logging;
pub mod scrypt;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const CMD_HASH: &str = "hash";
pub const CMD_VERIFY: &str = "verify";
pub const CMD_INSPECT: &str = "inspect";
pub const ARG_CREDENTIAL: &str = "credential";

fn credential_arg() -> Arg {
    Arg::new(ARG_CREDENTIAL)
        .short('c')
        .long(ARG_CREDENTIAL)
        .help("Stored credential, e.g. $scrypt,N=32768,r=8,p=1,len=32$<salt>$<hash>")
        .env("PASSCRYPT_CREDENTIAL")
        .required(true)
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("passcrypt")
        .about("Password credential hashing and verification")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(scrypt::with_args(
            Command::new(CMD_HASH).about("Hash a password read from stdin and print the credential"),
        ))
        .subcommand(
            Command::new(CMD_VERIFY)
                .about("Verify a password read from stdin against a stored credential")
                .arg(credential_arg()),
        )
        .subcommand(
            Command::new(CMD_INSPECT)
                .about("Print the scheme and parameters of a stored credential as JSON")
                .arg(credential_arg()),
        );

    logging::with_args(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "passcrypt");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Password credential hashing and verification"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_hash_defaults() {
        temp_env::with_vars(
            [
                ("PASSCRYPT_ALGORITHM", None::<&str>),
                ("PASSCRYPT_SCRYPT_N", None),
                ("PASSCRYPT_SCRYPT_R", None),
                ("PASSCRYPT_SCRYPT_P", None),
                ("PASSCRYPT_SCRYPT_LEN", None),
            ],
            || {
                let matches = new().get_matches_from(vec!["passcrypt", "hash"]);
                let (name, sub) = matches.subcommand().unwrap();
                assert_eq!(name, CMD_HASH);
                assert_eq!(
                    sub.get_one::<String>(scrypt::ARG_ALGORITHM).map(String::as_str),
                    Some("scrypt")
                );
                assert_eq!(sub.get_one::<u64>(scrypt::ARG_SCRYPT_N).copied(), Some(32768));
                assert_eq!(sub.get_one::<u32>(scrypt::ARG_SCRYPT_R).copied(), Some(8));
                assert_eq!(sub.get_one::<u32>(scrypt::ARG_SCRYPT_P).copied(), Some(1));
                assert_eq!(sub.get_one::<u64>(scrypt::ARG_SCRYPT_LEN).copied(), Some(32));
            },
        );
    }

    #[test]
    fn test_hash_env() {
        temp_env::with_vars(
            [
                ("PASSCRYPT_SCRYPT_N", Some("1024")),
                ("PASSCRYPT_SCRYPT_R", Some("4")),
                ("PASSCRYPT_SCRYPT_P", Some("2")),
                ("PASSCRYPT_SCRYPT_LEN", Some("16")),
                ("PASSCRYPT_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["passcrypt", "hash"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
                let (_, sub) = matches.subcommand().unwrap();
                assert_eq!(sub.get_one::<u64>(scrypt::ARG_SCRYPT_N).copied(), Some(1024));
                assert_eq!(sub.get_one::<u32>(scrypt::ARG_SCRYPT_R).copied(), Some(4));
                assert_eq!(sub.get_one::<u32>(scrypt::ARG_SCRYPT_P).copied(), Some(2));
                assert_eq!(sub.get_one::<u64>(scrypt::ARG_SCRYPT_LEN).copied(), Some(16));
            },
        );
    }

    #[test]
    fn test_hash_rejects_zero() {
        for arg in ["--scrypt-n", "--scrypt-r", "--scrypt-p", "--scrypt-len"] {
            let result = new().try_get_matches_from(vec!["passcrypt", "hash", arg, "0"]);
            assert!(result.is_err(), "{arg} accepted 0");
        }
    }

    #[test]
    fn test_hash_rejects_unknown_algorithm() {
        let result =
            new().try_get_matches_from(vec!["passcrypt", "hash", "--algorithm", "md5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_requires_credential() {
        temp_env::with_vars([("PASSCRYPT_CREDENTIAL", None::<&str>)], || {
            let result = new().try_get_matches_from(vec!["passcrypt", "verify"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_verify_credential_from_env() {
        temp_env::with_vars(
            [(
                "PASSCRYPT_CREDENTIAL",
                Some("$scrypt,N=1,r=2,p=3,len=4$AAEC$AwQF"),
            )],
            || {
                let matches = new().get_matches_from(vec!["passcrypt", "verify"]);
                let (name, sub) = matches.subcommand().unwrap();
                assert_eq!(name, CMD_VERIFY);
                assert_eq!(
                    sub.get_one::<String>(ARG_CREDENTIAL).map(String::as_str),
                    Some("$scrypt,N=1,r=2,p=3,len=4$AAEC$AwQF")
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("PASSCRYPT_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["passcrypt".to_string(), "hash".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }
}
