use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification of [`Error`].
///
/// Only [`ErrorKind::PasswordMismatch`] means "wrong password"; every other kind
/// points at corrupted input, misuse, or an environment problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidObject,
    InvalidSerialization,
    UnknownId,
    KeyDerivationFailure,
    PasswordMismatch,
    SaltGeneration,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid or uninitialized object provided")]
    InvalidObject,
    #[error("invalid value for parameter {key} at offset {offset}")]
    InvalidParameter { key: &'static str, offset: usize },
    #[error("invalid serialization at offset {offset}: {reason}")]
    InvalidSerialization { offset: usize, reason: &'static str },
    #[error("unknown credential scheme: {0}")]
    UnknownId(String),
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),
    #[error("provided password doesn't match hash")]
    PasswordMismatch,
    #[error("unable to generate salt")]
    SaltGeneration(#[source] rand::Error),
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidObject | Self::InvalidParameter { .. } => ErrorKind::InvalidObject,
            Self::InvalidSerialization { .. } => ErrorKind::InvalidSerialization,
            Self::UnknownId(_) => ErrorKind::UnknownId,
            Self::KeyDerivation(_) => ErrorKind::KeyDerivationFailure,
            Self::PasswordMismatch => ErrorKind::PasswordMismatch,
            Self::SaltGeneration(_) => ErrorKind::SaltGeneration,
        }
    }

    /// True only when a comparison ran to completion and the password was wrong.
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::PasswordMismatch)
    }

    /// Byte offset where decoding stopped, for scanner errors.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::InvalidParameter { offset, .. } | Self::InvalidSerialization { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }

    pub(crate) const fn serialization(offset: usize, reason: &'static str) -> Self {
        Self::InvalidSerialization { offset, reason }
    }
}
