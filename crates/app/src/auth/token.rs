//! Bearer token generation and hashing.
//!
//! Tokens look like `es_<64 hex chars>`. Only the SHA-256 digest of the full token is
//! persisted, so a leaked table cannot be replayed against the API.

use std::fmt::{self, Write as _};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Bearer token prefix.
pub const USER_TOKEN_PREFIX: &str = "es";

/// Number of random bytes encoded in a token.
pub const USER_TOKEN_SECRET_BYTES: usize = 32;

const USER_TOKEN_SECRET_HEX_CHARS: usize = USER_TOKEN_SECRET_BYTES * 2;

/// Random token material, wiped on drop.
#[derive(Clone)]
pub struct UserTokenSecret {
    bytes: [u8; USER_TOKEN_SECRET_BYTES],
}

impl UserTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; USER_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    /// Fresh secret from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; USER_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self::from_bytes(bytes)
    }

    /// Render the secret as a bearer token.
    #[must_use]
    pub fn to_token(&self) -> String {
        let mut token =
            String::with_capacity(USER_TOKEN_PREFIX.len() + 1 + USER_TOKEN_SECRET_HEX_CHARS);

        token.push_str(USER_TOKEN_PREFIX);
        token.push('_');

        for byte in &self.bytes {
            let _infallible = write!(token, "{byte:02x}");
        }

        token
    }
}

impl fmt::Debug for UserTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserTokenSecret(**redacted**)")
    }
}

impl Drop for UserTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Whether `token` has the shape of a bearer token this crate issued.
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    token
        .strip_prefix(USER_TOKEN_PREFIX)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|hex| {
            hex.len() == USER_TOKEN_SECRET_HEX_CHARS
                && hex.bytes().all(|byte| byte.is_ascii_hexdigit())
        })
}

/// Lowercase hex SHA-256 digest of a bearer token, as stored in `user_tokens`.
#[must_use]
pub fn hash_user_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());

    let mut hash = String::with_capacity(digest.len() * 2);

    for byte in digest {
        let _infallible = write!(hash, "{byte:02x}");
    }

    hash
}
