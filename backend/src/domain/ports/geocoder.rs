//! Driven port resolving free-text addresses to coordinates.

use async_trait::async_trait;

use crate::domain::Coordinates;

use super::define_port_error;

/// Best match returned by a geocoding provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    /// Resolved point.
    pub coordinates: Coordinates,
    /// Provider's canonical name for the place, when supplied.
    pub place_name: Option<String>,
}

define_port_error! {
    /// Errors surfaced while geocoding an address.
    pub enum GeocoderError {
        /// No provider is configured.
        Disabled => "geocoding is not configured",
        /// Network transport failed before a response arrived.
        Transport { message: String } => "geocoding transport failed: {message}",
        /// The provider did not answer within the configured timeout.
        Timeout { message: String } => "geocoding timed out: {message}",
        /// The provider answered with a non-success status.
        Status { message: String } => "geocoding provider rejected request: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "geocoding response invalid: {message}",
    }
}

/// Address-to-coordinates lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `address`. `Ok(None)` means the provider found no match.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, GeocoderError>;
}
