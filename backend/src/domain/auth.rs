//! Authentication primitives: login credentials, token claims and outcomes.
//!
//! Inbound payload parsing stays outside the domain; handlers build these
//! values through validating constructors before talking to a port.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{DonorId, DonorProfile, Email};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use donex::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("rajesh@gmail.com", "password123").unwrap();
/// assert_eq!(creds.email().as_ref(), "rajesh@gmail.com");
/// assert_eq!(creds.password(), "password123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email).map_err(|_| LoginValidationError::EmptyEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the donor lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Donor identifier the token was issued to.
    pub id: i64,
    /// Email of the donor at issue time.
    pub email: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl TokenClaims {
    /// Identifier of the authenticated donor.
    pub fn donor_id(&self) -> DonorId {
        DonorId::new(self.id)
    }

    /// Whether the token has expired at `now` (seconds since the epoch).
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    /// Signed bearer token.
    pub token: String,
    /// Profile of the authenticated donor.
    pub user: DonorProfile,
}
