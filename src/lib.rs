//! # Passcrypt
//!
//! Self-describing password credentials.
//!
//! [`password`] turns a plaintext password into a single text string that
//! names the hashing scheme, its cost parameters, the salt, and the derived
//! key, and later verifies a password against that string:
//!
//! ```text
//! $scrypt,N=32768,r=8,p=1,len=32$<base64url salt>$<base64url hash>
//! ```
//!
//! Storage, transport, rate limiting, and lockout belong to the caller. The
//! only error a caller should count as a failed login is
//! [`password::Error::PasswordMismatch`]; everything else means the stored
//! credential or the configuration is broken.
//!
//! The `passcrypt` binary wraps the library for operators: `hash`, `verify`
//! and `inspect` subcommands, reading passwords from stdin.

pub mod cli;
pub mod password;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }
}
