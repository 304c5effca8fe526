//! Driving port for login.
//!
//! Inbound adapters call it to exchange credentials for a bearer token
//! without knowing which repository or token scheme backs it.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return a token with the donor's profile.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
