//! Donor registration: request validation and the orchestrating service.
//!
//! The service checks for an existing email before geocoding so duplicates
//! are rejected without a provider round-trip. Geocoding is best-effort: any
//! failure is logged and the donor is stored without a location. The
//! repository's own duplicate check on insert covers concurrent
//! registrations that race past the first lookup.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info, warn};
use zeroize::Zeroizing;

use super::repository_error_mapping::map_repository_error;
use crate::domain::ports::{
    DonorRepository, DonorRepositoryError, Geocoder, PasswordHasher, RegistrationCommand,
};
use crate::domain::{Age, BloodType, Coordinates, DonorId, Email, Error, NewDonor};

/// Message returned when the email is already taken.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already registered";

/// Validation failures for registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// A required field was blank.
    MissingField(&'static str),
    /// Age fell outside the eligible donor range.
    AgeOutOfRange(i64),
    /// Blood type label was not recognised.
    UnknownBloodType(String),
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::AgeOutOfRange(age) => write!(
                f,
                "age {age} must be between {} and {}",
                Age::MIN,
                Age::MAX
            ),
            Self::UnknownBloodType(raw) => write!(f, "unknown blood type: {raw}"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Raw registration fields as received from an inbound adapter.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationParts<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub age: i64,
    pub blood_type: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub is_donor: bool,
}

/// Validated registration request.
///
/// ## Invariants
/// - `name`, `address` and `phone` are trimmed and non-empty.
/// - `password` is non-empty.
/// - `age` is within `[18, 65]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRequest {
    name: String,
    email: Email,
    password: Zeroizing<String>,
    age: Age,
    blood_type: BloodType,
    address: String,
    phone: String,
    is_donor: bool,
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, RegistrationValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RegistrationValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

impl RegistrationRequest {
    /// Validate raw fields.
    ///
    /// # Examples
    /// ```
    /// use donex::domain::{RegistrationParts, RegistrationRequest};
    ///
    /// let request = RegistrationRequest::try_from_parts(RegistrationParts {
    ///     name: "Rajesh Kumar",
    ///     email: "rajesh@gmail.com",
    ///     password: "password123",
    ///     age: 28,
    ///     blood_type: "O+",
    ///     address: "Andheri West, Mumbai",
    ///     phone: "+91-9876543210",
    ///     is_donor: true,
    /// })
    /// .unwrap();
    /// assert_eq!(request.email().as_ref(), "rajesh@gmail.com");
    /// ```
    pub fn try_from_parts(parts: RegistrationParts<'_>) -> Result<Self, RegistrationValidationError> {
        let name = required(parts.name, "name")?;
        let email = required(parts.email, "email")?;
        if parts.password.is_empty() {
            return Err(RegistrationValidationError::MissingField("password"));
        }
        let blood_type = required(parts.blood_type, "bloodType")?;
        let address = required(parts.address, "address")?;
        let phone = required(parts.phone, "phone")?;

        let age = Age::new(parts.age)
            .map_err(|_| RegistrationValidationError::AgeOutOfRange(parts.age))?;
        let blood_type = blood_type
            .parse::<BloodType>()
            .map_err(|err| RegistrationValidationError::UnknownBloodType(err.0))?;
        let email =
            Email::new(email).map_err(|_| RegistrationValidationError::MissingField("email"))?;

        Ok(Self {
            name: name.to_owned(),
            email,
            password: Zeroizing::new(parts.password.to_owned()),
            age,
            blood_type,
            address: address.to_owned(),
            phone: phone.to_owned(),
            is_donor: parts.is_donor,
        })
    }

    /// Email the donor will log in with.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Free-text home address.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }
}

/// Domain service implementing [`RegistrationCommand`].
#[derive(Clone)]
pub struct RegistrationService {
    repository: Arc<dyn DonorRepository>,
    geocoder: Arc<dyn Geocoder>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl RegistrationService {
    /// Create a registration service from its collaborators.
    pub fn new(
        repository: Arc<dyn DonorRepository>,
        geocoder: Arc<dyn Geocoder>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            geocoder,
            hasher,
            clock,
        }
    }

    async fn resolve_location(&self, address: &str) -> Option<Coordinates> {
        match self.geocoder.geocode(address).await {
            Ok(Some(found)) => {
                info!(
                    place_name = found.place_name.as_deref().unwrap_or_default(),
                    "address geocoded"
                );
                Some(found.coordinates)
            }
            Ok(None) => {
                warn!("geocoder found no match for address; storing donor without location");
                None
            }
            Err(err) => {
                warn!(error = %err, "geocoding failed; storing donor without location");
                None
            }
        }
    }
}

fn duplicate_email_error() -> Error {
    Error::invalid_request(DUPLICATE_EMAIL_MESSAGE)
        .with_details(json!({ "field": "email", "code": "duplicate_email" }))
}

#[async_trait]
impl RegistrationCommand for RegistrationService {
    async fn register(&self, request: RegistrationRequest) -> Result<DonorId, Error> {
        let existing = self
            .repository
            .find_by_email(&request.email)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(duplicate_email_error());
        }

        let location = self.resolve_location(&request.address).await;
        let password_hash = self
            .hasher
            .hash(request.password.as_str())
            .await
            .map_err(|err| {
                error!(error = %err, "password hashing failed");
                Error::internal("failed to hash password")
            })?;

        let RegistrationRequest {
            name,
            email,
            age,
            blood_type,
            address,
            phone,
            is_donor,
            ..
        } = request;
        let donor = NewDonor {
            name,
            email,
            password_hash,
            age,
            blood_type,
            address,
            phone,
            is_donor,
            location,
            created_at: self.clock.utc(),
        };

        match self.repository.insert(donor).await {
            Ok(id) => {
                info!(donor_id = %id, has_location = location.is_some(), "donor registered");
                Ok(id)
            }
            Err(DonorRepositoryError::DuplicateEmail) => Err(duplicate_email_error()),
            Err(err) => Err(map_repository_error(err)),
        }
    }
}
