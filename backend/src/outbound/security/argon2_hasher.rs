//! Argon2id password hashing adapter.
//!
//! Argon2 is deliberately slow, so both operations run on tokio's blocking
//! pool and leave the request workers free.

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash as EncodedHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use async_trait::async_trait;
use rand::rngs::OsRng;
use tokio::task;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Hashes passwords into PHC strings using Argon2id with default parameters.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Create a hasher with the crate's default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }
}

fn hash_blocking(argon2: &Argon2<'_>, password: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let encoded = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHashError::hash(err.to_string()))?;
    Ok(PasswordHash::new(encoded.to_string()))
}

fn verify_blocking(
    argon2: &Argon2<'_>,
    password: &str,
    hash: &PasswordHash,
) -> Result<bool, PasswordHashError> {
    let parsed = EncodedHash::new(hash.as_str())
        .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
    match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
    }
}

fn join_error(err: &task::JoinError) -> PasswordHashError {
    PasswordHashError::hash(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let argon2 = self.argon2.clone();
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || hash_blocking(&argon2, &password))
            .await
            .map_err(|err| join_error(&err))?
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let argon2 = self.argon2.clone();
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.clone();
        task::spawn_blocking(move || verify_blocking(&argon2, &password, &hash))
            .await
            .map_err(|err| join_error(&err))?
    }
}
