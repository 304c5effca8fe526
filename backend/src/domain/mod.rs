//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed donor entities and the use-cases that
//! operate on them. Nothing here depends on HTTP, SQL or a geocoding vendor;
//! those live behind the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Coordinates, haversine_km: geographic primitives.
//! - DonorRecord and its projections DonorProfile, DonorSummary, DonorMatch.
//! - RegistrationService, CredentialLoginService, DonorSearchService: the
//!   driving-port implementations.

pub mod auth;
pub mod blood_type;
pub mod donor;
pub mod donor_search;
pub mod error;
pub mod geo;
pub mod login;
pub mod ports;
pub mod registration;
mod repository_error_mapping;
pub mod trace_id;

pub use self::auth::{LoginCredentials, LoginOutcome, LoginValidationError, TokenClaims};
pub use self::blood_type::{BloodType, UnknownBloodType};
pub use self::donor::{
    Age, DonorId, DonorMatch, DonorProfile, DonorRecord, DonorSummary, DonorValidationError,
    Email, NewDonor, PasswordHash,
};
pub use self::donor_search::{DonorSearchService, SearchQuery};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::geo::{CoordinateError, Coordinates, EARTH_RADIUS_KM, haversine_km};
pub use self::login::{CredentialLoginService, INVALID_CREDENTIALS_MESSAGE};
pub use self::registration::{
    DUPLICATE_EMAIL_MESSAGE, RegistrationParts, RegistrationRequest, RegistrationService,
    RegistrationValidationError,
};
pub use self::trace_id::TraceId;
