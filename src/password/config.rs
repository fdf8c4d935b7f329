use super::{scrypt, Crypter, Error, Scrypt, ScryptParams};
use std::{fmt, str::FromStr};

/// Registered credential schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Scrypt,
}

impl Algorithm {
    pub const ALL: &'static [Self] = &[Self::Scrypt];

    /// Identifier written at the front of the credential.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Scrypt => scrypt::ID,
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|algorithm| algorithm.id() == id)
    }

    /// Unset scheme of this kind, ready to be unmarshaled.
    pub(crate) fn empty(self) -> Box<dyn Crypter> {
        match self {
            Self::Scrypt => Box::new(Scrypt::empty()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| Error::UnknownId(s.to_string()))
    }
}

/// Settings for new credentials.
///
/// Passed by value into whatever creates a fresh scheme; existing credentials
/// carry their own parameters and never read this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub algorithm: Algorithm,
    pub scrypt: ScryptParams,
}

impl Config {
    #[must_use]
    pub const fn new(algorithm: Algorithm, scrypt: ScryptParams) -> Self {
        Self { algorithm, scrypt }
    }

    /// Fresh, unhashed scheme for a new password.
    #[must_use]
    pub fn crypter(&self) -> Box<dyn Crypter> {
        match self.algorithm {
            Algorithm::Scrypt => Box::new(Scrypt::new(self.scrypt)),
        }
    }
}
