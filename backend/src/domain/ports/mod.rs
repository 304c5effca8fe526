//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`DonorRepository`, `Geocoder`, `PasswordHasher`,
//! `TokenIssuer`) are implemented under `outbound`. Driving ports
//! (`RegistrationCommand`, `LoginService`, `DonorSearchQuery`) are implemented
//! by domain services and called from `inbound`.

mod macros;
pub(crate) use macros::define_port_error;

mod donor_repository;
mod donor_search_query;
mod geocoder;
mod login_service;
mod password_hasher;
mod registration_command;
mod token_issuer;

#[cfg(test)]
pub use donor_repository::MockDonorRepository;
pub use donor_repository::{DonorRepository, DonorRepositoryError};
#[cfg(test)]
pub use donor_search_query::MockDonorSearchQuery;
pub use donor_search_query::DonorSearchQuery;
#[cfg(test)]
pub use geocoder::MockGeocoder;
pub use geocoder::{GeocodedAddress, Geocoder, GeocoderError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::RegistrationCommand;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
