use super::{Error, Result};
use rand::{rngs::OsRng, RngCore};

/// Fill a fresh `len`-byte salt from the operating system CSPRNG.
///
/// # Errors
/// Returns [`Error::SaltGeneration`] if the OS entropy source fails.
pub fn new_salt(len: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(Error::SaltGeneration)?;
    Ok(salt)
}
