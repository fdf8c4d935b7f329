//! Password credential hashing.
//!
//! A [`Crypter`] turns a plaintext password into a self-describing text
//! credential and later checks a password against it:
//!
//! ```no_run
//! use passcrypt::password::{self, Config};
//!
//! # fn main() -> Result<(), password::Error> {
//! let stored = password::hash_password(&Config::default(), b"correct horse")?;
//!
//! match password::verify_password(&stored, b"battery staple") {
//!     Ok(()) => println!("welcome"),
//!     Err(e) if e.is_mismatch() => println!("wrong password"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The identifier at the front of a credential selects the scheme, and every
//! parameter needed to verify it travels inside the string, so verification
//! never depends on the configuration that was active at hashing time.

mod compare;
mod config;
pub mod encoding;
mod error;
mod salt;
pub mod scrypt;
pub mod worker;

pub use self::compare::constant_time_eq;
pub use self::config::{Algorithm, Config};
pub use self::error::{Error, ErrorKind, Result};
pub use self::salt::new_salt;
pub use self::scrypt::{Scrypt, ScryptParams};

use std::fmt;

/// One password hashing scheme.
///
/// Callers hold a `Box<dyn Crypter>` obtained from [`Config::crypter`] or
/// [`from_encoded`] and never name the concrete type.
pub trait Crypter: fmt::Debug + Send + Sync {
    /// Scheme identifier, empty until the scheme is populated.
    fn id(&self) -> &str;

    /// Tunable parameters in serialization order.
    fn parameters(&self) -> Vec<(&'static str, u64)>;

    /// Derive a new salt and hash from `password`, replacing any previous state.
    ///
    /// # Errors
    /// [`Error::KeyDerivation`] if the KDF rejects the parameters,
    /// [`Error::SaltGeneration`] if the OS RNG fails.
    fn hash(&mut self, password: &[u8]) -> Result<()>;

    /// Check `password` against the stored hash in constant time.
    ///
    /// # Errors
    /// [`Error::PasswordMismatch`] if the password is wrong; any other error is
    /// structural.
    fn compare(&self, password: &[u8]) -> Result<()>;

    /// Render the canonical text form.
    ///
    /// # Errors
    /// [`Error::InvalidObject`] if the scheme has not been populated.
    fn marshal(&self) -> Result<String>;

    /// Replace this scheme's state with the one encoded in `src`.
    /// On error the scheme is left as it was.
    ///
    /// # Errors
    /// [`Error::InvalidSerialization`], [`Error::InvalidParameter`] or
    /// [`Error::UnknownId`] if `src` does not decode.
    fn unmarshal(&mut self, src: &str) -> Result<()>;
}

/// Rebuild a scheme from a stored credential.
///
/// # Errors
/// Returns [`Error::UnknownId`] if no scheme is registered for the identifier,
/// or the scheme's own [`Crypter::unmarshal`] error.
pub fn from_encoded(src: &str) -> Result<Box<dyn Crypter>> {
    let id = encoding::peek_id(src)?;
    let algorithm = Algorithm::from_id(id).ok_or_else(|| Error::UnknownId(id.to_string()))?;

    let mut crypter = algorithm.empty();
    crypter.unmarshal(src)?;
    Ok(crypter)
}

/// Hash `password` with the scheme selected by `config` and return the
/// credential to store.
///
/// # Errors
/// Returns any [`Crypter::hash`] or [`Crypter::marshal`] error.
pub fn hash_password(config: &Config, password: &[u8]) -> Result<String> {
    let mut crypter = config.crypter();
    crypter.hash(password)?;
    crypter.marshal()
}

/// Check `password` against a stored credential.
///
/// # Errors
/// Returns [`Error::PasswordMismatch`] for a wrong password, or a structural
/// error if `encoded` cannot be decoded or verified.
pub fn verify_password(encoded: &str, password: &[u8]) -> Result<()> {
    from_encoded(encoded)?.compare(password)
}
