//! scrypt credential scheme.
//!
//! Serialized as `$scrypt,N=<n>,r=<r>,p=<p>,len=<len>$<salt>$<hash>`, where
//! `len` is both the salt length and the derived key length in bytes.

use super::{
    compare::constant_time_eq,
    encoding::{self, Layout, Param},
    salt::new_salt,
    Crypter, Error, Result,
};
use std::fmt;
use tracing::instrument;

pub const ID: &str = "scrypt";

const LAYOUT: Layout = Layout {
    id: ID,
    keys: &["N", "r", "p", "len"],
    len_key: "len",
};

/// Upper bound on the KDF working set (`128 * r * (N + p)` bytes).
const MAX_MEMORY_BYTES: u128 = 1 << 30;

/// Upper bound on salt and derived key length.
const MAX_LEN: usize = 1024;

/// scrypt cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScryptParams {
    /// CPU/memory cost; must be a power of two.
    pub n: u64,
    /// Block size.
    pub r: u32,
    /// Parallelization factor.
    pub p: u32,
    /// Salt and derived key length in bytes.
    pub len: usize,
}

impl ScryptParams {
    pub const DEFAULT_N: u64 = 1 << 15;
    pub const DEFAULT_R: u32 = 8;
    pub const DEFAULT_P: u32 = 1;
    pub const DEFAULT_LEN: usize = 32;

    #[must_use]
    pub const fn new(n: u64, r: u32, p: u32, len: usize) -> Self {
        Self { n, r, p, len }
    }

    /// Check that every parameter is strictly positive.
    ///
    /// # Errors
    /// Returns [`Error::InvalidObject`] if any parameter is zero.
    pub const fn validate(&self) -> Result<()> {
        if self.n == 0 || self.r == 0 || self.p == 0 || self.len == 0 {
            return Err(Error::InvalidObject);
        }
        Ok(())
    }

    /// Build the KDF parameters, enforcing the resource limits.
    fn kdf(&self) -> Result<scrypt::Params> {
        self.validate()?;

        if !self.n.is_power_of_two() {
            return Err(Error::KeyDerivation(format!(
                "N={} is not a power of two",
                self.n
            )));
        }
        let log_n = u8::try_from(self.n.trailing_zeros())
            .map_err(|_| Error::KeyDerivation(format!("N={} is too large", self.n)))?;

        let memory = 128 * u128::from(self.r) * (u128::from(self.n) + u128::from(self.p));
        if memory > MAX_MEMORY_BYTES {
            return Err(Error::KeyDerivation(format!(
                "memory cost of {memory} bytes exceeds the {MAX_MEMORY_BYTES} byte limit"
            )));
        }

        if self.len > MAX_LEN {
            return Err(Error::KeyDerivation(format!(
                "len={} exceeds the {MAX_LEN} byte limit",
                self.len
            )));
        }

        scrypt::Params::new(log_n, self.r, self.p, scrypt::Params::RECOMMENDED_LEN)
            .map_err(|e| Error::KeyDerivation(e.to_string()))
    }
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_N,
            Self::DEFAULT_R,
            Self::DEFAULT_P,
            Self::DEFAULT_LEN,
        )
    }
}

/// An scrypt credential: parameters, salt, and derived key.
///
/// A value built with [`Scrypt::new`] or [`Scrypt::empty`] holds no salt or
/// key until [`Crypter::hash`] or [`Crypter::unmarshal`] succeeds.
#[derive(Clone, Default)]
pub struct Scrypt {
    id: String,
    params: ScryptParams,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl Scrypt {
    /// Fresh scheme that will hash with `params`.
    #[must_use]
    pub fn new(params: ScryptParams) -> Self {
        Self {
            id: ID.to_string(),
            params,
            salt: Vec::new(),
            digest: Vec::new(),
        }
    }

    /// Unset scheme, ready for [`Crypter::unmarshal`].
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble a populated scheme from stored pieces.
    #[must_use]
    pub fn from_parts(params: ScryptParams, salt: Vec<u8>, digest: Vec<u8>) -> Self {
        Self {
            id: ID.to_string(),
            params,
            salt,
            digest,
        }
    }

    #[must_use]
    pub const fn params(&self) -> &ScryptParams {
        &self.params
    }

    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    #[must_use]
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    fn is_populated(&self) -> bool {
        !self.id.is_empty() && !self.salt.is_empty() && !self.digest.is_empty()
    }
}

impl fmt::Debug for Scrypt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scrypt")
            .field("id", &self.id)
            .field("params", &self.params)
            .field("salt_len", &self.salt.len())
            .field("digest", &"<redacted>")
            .finish()
    }
}

impl Crypter for Scrypt {
    fn id(&self) -> &str {
        &self.id
    }

    fn parameters(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("N", self.params.n),
            ("r", u64::from(self.params.r)),
            ("p", u64::from(self.params.p)),
            ("len", self.params.len as u64),
        ]
    }

    #[instrument(skip_all, fields(n = self.params.n, r = self.params.r, p = self.params.p, len = self.params.len))]
    fn hash(&mut self, password: &[u8]) -> Result<()> {
        let kdf = self.params.kdf()?;
        let salt = new_salt(self.params.len)?;
        let digest = derive(password, &salt, &kdf, self.params.len)?;

        self.id = ID.to_string();
        self.salt = salt;
        self.digest = digest;

        Ok(())
    }

    #[instrument(skip_all, fields(n = self.params.n, r = self.params.r, p = self.params.p, len = self.params.len))]
    fn compare(&self, password: &[u8]) -> Result<()> {
        if !self.is_populated() {
            return Err(Error::InvalidObject);
        }

        let kdf = self.params.kdf()?;
        let candidate = derive(password, &self.salt, &kdf, self.params.len)?;

        if constant_time_eq(&candidate, &self.digest) {
            Ok(())
        } else {
            Err(Error::PasswordMismatch)
        }
    }

    fn marshal(&self) -> Result<String> {
        if !self.is_populated() {
            return Err(Error::InvalidObject);
        }
        self.params.validate()?;

        encoding::encode(&self.id, &self.parameters(), &self.salt, &self.digest)
    }

    fn unmarshal(&mut self, src: &str) -> Result<()> {
        let decoded = encoding::decode(src, &LAYOUT)?;

        let [n, r, p, len] = decoded.params.as_slice() else {
            return Err(Error::serialization(0, "unexpected parameter count"));
        };
        let params = ScryptParams {
            n: n.value,
            r: narrow(r)?,
            p: narrow(p)?,
            len: narrow(len)?,
        };

        *self = Self {
            id: decoded.id.to_string(),
            params,
            salt: decoded.salt,
            digest: decoded.hash,
        };

        Ok(())
    }
}

fn narrow<T: TryFrom<u64>>(param: &Param) -> Result<T> {
    T::try_from(param.value).map_err(|_| Error::serialization(param.offset, "integer overflow"))
}

fn derive(password: &[u8], salt: &[u8], kdf: &scrypt::Params, len: usize) -> Result<Vec<u8>> {
    let mut out = vec![0u8; len];
    scrypt::scrypt(password, salt, kdf, &mut out)
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;
    Ok(out)
}
