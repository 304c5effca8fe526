//! ABO/Rh blood groups accepted by the directory.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error returned when a blood type label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBloodType(pub String);

impl fmt::Display for UnknownBloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown blood type: {}", self.0)
    }
}

impl std::error::Error for UnknownBloodType {}

/// One of the eight ABO/Rh blood groups.
///
/// Serialised as the conventional label (`"O+"`, `"AB-"`, ...).
///
/// # Examples
/// ```
/// use donex::domain::BloodType;
///
/// let parsed: BloodType = "AB-".parse().unwrap();
/// assert_eq!(parsed, BloodType::AbNegative);
/// assert_eq!(parsed.as_str(), "AB-");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BloodType {
    /// O Rh-positive.
    #[serde(rename = "O+")]
    OPositive,
    /// O Rh-negative.
    #[serde(rename = "O-")]
    ONegative,
    /// A Rh-positive.
    #[serde(rename = "A+")]
    APositive,
    /// A Rh-negative.
    #[serde(rename = "A-")]
    ANegative,
    /// B Rh-positive.
    #[serde(rename = "B+")]
    BPositive,
    /// B Rh-negative.
    #[serde(rename = "B-")]
    BNegative,
    /// AB Rh-positive.
    #[serde(rename = "AB+")]
    AbPositive,
    /// AB Rh-negative.
    #[serde(rename = "AB-")]
    AbNegative,
}

impl BloodType {
    /// Every blood type in canonical order.
    pub const ALL: [BloodType; 8] = [
        Self::OPositive,
        Self::ONegative,
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
    ];

    /// Conventional label for the blood type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OPositive => "O+",
            Self::ONegative => "O-",
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = UnknownBloodType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownBloodType(trimmed.to_owned()))
    }
}
