//! Donor records and the value types they are built from.
//!
//! `DonorRecord` is the stored aggregate. Callers outside the repository
//! only ever see projections of it: [`DonorProfile`] after login and
//! [`DonorSummary`] in search results. Neither projection carries the
//! password hash, and [`PasswordHash`] has no `Serialize` impl.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BloodType, Coordinates};

/// Unique donor identifier assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonorId(i64);

impl DonorId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DonorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for donor value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonorValidationError {
    /// Email was blank once trimmed.
    EmptyEmail,
    /// Age fell outside the permitted donor range.
    AgeOutOfRange(i64),
}

impl fmt::Display for DonorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::AgeOutOfRange(age) => write!(
                f,
                "age {age} must be between {} and {}",
                Age::MIN,
                Age::MAX
            ),
        }
    }
}

impl std::error::Error for DonorValidationError {}

/// Email address used as the unique login key.
///
/// Surrounding whitespace is trimmed; the remaining text is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate and wrap an email address.
    ///
    /// # Examples
    /// ```
    /// use donex::domain::Email;
    ///
    /// let email = Email::new("  priya@gmail.com ").unwrap();
    /// assert_eq!(email.as_ref(), "priya@gmail.com");
    /// ```
    pub fn new(raw: &str) -> Result<Self, DonorValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DonorValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Donor age in whole years, restricted to the eligible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Age(u8);

impl Age {
    /// Youngest eligible donor age.
    pub const MIN: u8 = 18;
    /// Oldest eligible donor age.
    pub const MAX: u8 = 65;

    /// Validate an age in years.
    ///
    /// # Examples
    /// ```
    /// use donex::domain::Age;
    ///
    /// assert!(Age::new(18).is_ok());
    /// assert!(Age::new(66).is_err());
    /// ```
    pub fn new(years: i64) -> Result<Self, DonorValidationError> {
        u8::try_from(years)
            .ok()
            .filter(|value| (Self::MIN..=Self::MAX).contains(value))
            .map(Self)
            .ok_or(DonorValidationError::AgeOutOfRange(years))
    }

    /// Age in years.
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Opaque password verifier material produced by a password hasher.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Insert payload for a new donor record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonor {
    pub name: String,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub age: Age,
    pub blood_type: BloodType,
    pub address: String,
    pub phone: String,
    pub is_donor: bool,
    pub location: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
}

/// A stored donor record.
///
/// Records are created once at registration and never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct DonorRecord {
    pub id: DonorId,
    pub name: String,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub age: Age,
    pub blood_type: BloodType,
    pub address: String,
    pub phone: String,
    pub is_donor: bool,
    pub location: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
}

impl DonorRecord {
    /// Combine an insert payload with its assigned identifier.
    pub fn from_new(id: DonorId, donor: NewDonor) -> Self {
        let NewDonor {
            name,
            email,
            password_hash,
            age,
            blood_type,
            address,
            phone,
            is_donor,
            location,
            created_at,
        } = donor;
        Self {
            id,
            name,
            email,
            password_hash,
            age,
            blood_type,
            address,
            phone,
            is_donor,
            location,
            created_at,
        }
    }

    /// Public profile of this record.
    pub fn profile(&self) -> DonorProfile {
        DonorProfile {
            id: self.id.get(),
            name: self.name.clone(),
            email: self.email.to_string(),
            age: self.age.get(),
            blood_type: self.blood_type,
            address: self.address.clone(),
            phone: self.phone.clone(),
            is_donor: self.is_donor,
            latitude: self.location.map(|point| point.latitude()),
            longitude: self.location.map(|point| point.longitude()),
            created_at: self.created_at,
        }
    }

    /// Search-result projection of this record.
    pub fn summary(&self) -> DonorSummary {
        DonorSummary {
            id: self.id.get(),
            name: self.name.clone(),
            blood_type: self.blood_type,
            address: self.address.clone(),
            phone: self.phone.clone(),
            age: self.age.get(),
            latitude: self.location.map(|point| point.latitude()),
            longitude: self.location.map(|point| point.longitude()),
        }
    }
}

/// Donor record without credential material, returned after login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonorProfile {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Rajesh Kumar")]
    pub name: String,
    #[schema(example = "rajesh@gmail.com")]
    pub email: String,
    #[schema(example = 28)]
    pub age: u8,
    pub blood_type: BloodType,
    #[schema(example = "Andheri West, Mumbai, Maharashtra")]
    pub address: String,
    #[schema(example = "+91-9876543210")]
    pub phone: String,
    pub is_donor: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Donor fields exposed in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonorSummary {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Rajesh Kumar")]
    pub name: String,
    pub blood_type: BloodType,
    #[schema(example = "Andheri West, Mumbai, Maharashtra")]
    pub address: String,
    #[schema(example = "+91-9876543210")]
    pub phone: String,
    #[schema(example = 28)]
    pub age: u8,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A search hit: the donor plus its distance from the query origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DonorMatch {
    #[serde(flatten)]
    pub donor: DonorSummary,
    /// Kilometres from the query origin; absent when no origin was given.
    #[serde(rename = "distance", default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}
