//! Driven port for issuing and verifying bearer tokens.

use crate::domain::{DonorId, Email, TokenClaims};

use super::define_port_error;

define_port_error! {
    /// Errors raised while issuing or verifying tokens.
    pub enum TokenError {
        /// The token is not structurally valid.
        Malformed { message: String } => "malformed token: {message}",
        /// The signature does not match the token contents.
        BadSignature => "token signature mismatch",
        /// The token is past its expiry.
        Expired => "token expired",
        /// A token could not be produced.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Bearer token issuance and verification.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a signed token for the donor.
    fn issue(&self, donor: DonorId, email: &Email) -> Result<String, TokenError>;

    /// Verify signature and expiry and return the embedded claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
