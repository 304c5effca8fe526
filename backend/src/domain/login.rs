//! Credential login: verify a password and issue a bearer token.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::repository_error_mapping::map_repository_error;
use crate::domain::ports::{DonorRepository, LoginService, PasswordHasher, TokenIssuer};
use crate::domain::{Error, LoginCredentials, LoginOutcome};

/// Message returned for any unknown email or wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

fn invalid_credentials() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

/// Domain service implementing [`LoginService`] against stored donors.
#[derive(Clone)]
pub struct CredentialLoginService {
    repository: Arc<dyn DonorRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl CredentialLoginService {
    /// Create a login service from its collaborators.
    pub fn new(
        repository: Arc<dyn DonorRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl LoginService for CredentialLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(record) = self
            .repository
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
        else {
            // Spend one password derivation so the reply time matches a
            // password mismatch.
            if let Err(err) = self.hasher.hash(credentials.password()).await {
                debug!(error = %err, "decoy hash failed");
            }
            debug!("login rejected: unknown email");
            return Err(invalid_credentials());
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &record.password_hash)
            .await
            .map_err(|err| {
                error!(donor_id = %record.id, error = %err, "stored password hash unusable");
                Error::internal("failed to verify password")
            })?;
        if !verified {
            debug!(donor_id = %record.id, "login rejected: password mismatch");
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(record.id, &record.email).map_err(|err| {
            error!(donor_id = %record.id, error = %err, "token issuance failed");
            Error::internal("failed to issue token")
        })?;
        info!(donor_id = %record.id, "donor logged in");

        Ok(LoginOutcome {
            token,
            user: record.profile(),
        })
    }
}
