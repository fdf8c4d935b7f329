use crate::cli::actions::read_password;
use crate::password::{worker, Config};
use anyhow::Result;
use secrecy::SecretString;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub config: Config,
}

/// Hash the password read from stdin and print the credential.
/// # Errors
/// Returns an error if stdin cannot be read or hashing fails.
pub async fn execute(args: Args) -> Result<()> {
    let password = read_password(std::io::stdin().lock())?;
    let encoded = hash(args, password).await?;
    println!("{encoded}");
    Ok(())
}

/// # Errors
/// Returns an error if the configured parameters are rejected or the RNG fails.
pub async fn hash(args: Args, password: SecretString) -> Result<String> {
    let Args { config } = args;
    debug!(
        algorithm = %config.algorithm,
        n = config.scrypt.n,
        r = config.scrypt.r,
        p = config.scrypt.p,
        len = config.scrypt.len,
        "hashing password"
    );

    let encoded = worker::hash_password_blocking(config, password).await?;

    info!(algorithm = %config.algorithm, "credential created");
    Ok(encoded)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::password::{self, Algorithm, ErrorKind, ScryptParams};

    #[tokio::test]
    async fn test_hash() {
        let args = Args {
            config: Config::new(Algorithm::Scrypt, ScryptParams::new(1 << 10, 8, 1, 16)),
        };
        let encoded = hash(args, SecretString::from("something".to_string()))
            .await
            .unwrap();

        assert!(encoded.starts_with("$scrypt,N=1024,r=8,p=1,len=16$"));
        password::verify_password(&encoded, b"something").unwrap();
    }

    #[tokio::test]
    async fn test_hash_rejects_bad_cost() {
        let args = Args {
            config: Config::new(Algorithm::Scrypt, ScryptParams::new(1000, 8, 1, 16)),
        };
        let err = hash(args, SecretString::from("something".to_string()))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<password::Error>().unwrap().kind(),
            ErrorKind::KeyDerivationFailure
        );
    }
}
