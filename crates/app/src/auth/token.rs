//! API token generation and hashing.

use std::fmt::Write as _;

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Prefix identifying storefront API tokens.
pub const API_TOKEN_PREFIX: &str = "sf";

/// Number of random bytes behind each token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

/// Generates a fresh opaque API token. The raw value is shown once at
/// issuance; only its hash is ever stored.
#[must_use]
pub fn generate_api_token() -> String {
    let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut bytes);

    let mut token = String::with_capacity(API_TOKEN_PREFIX.len() + 1 + bytes.len() * 2);

    token.push_str(API_TOKEN_PREFIX);
    token.push('_');

    for byte in bytes {
        let _ = write!(token, "{byte:02x}");
    }

    token
}

/// Digest used to look a token up in storage.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_carry_the_prefix() {
        let token = generate_api_token();

        assert!(token.starts_with("sf_"), "unexpected token form: {token}");
        assert_eq!(token.len(), 3 + API_TOKEN_SECRET_BYTES * 2);
    }

    #[test]
    fn generated_tokens_are_unique() {
        assert_ne!(generate_api_token(), generate_api_token());
    }

    #[test]
    fn hashing_is_stable_and_token_free() {
        let token = "sf_0123";

        assert_eq!(hash_api_token(token), hash_api_token(token));
        assert!(!hash_api_token(token).contains(token));
    }
}
