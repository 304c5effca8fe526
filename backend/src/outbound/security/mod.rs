//! Credential adapters: password hashing and bearer token signing.

mod argon2_hasher;
mod hmac_token_issuer;

pub use argon2_hasher::Argon2PasswordHasher;
pub use hmac_token_issuer::{DEFAULT_TOKEN_TTL_HOURS, HmacTokenIssuer};
