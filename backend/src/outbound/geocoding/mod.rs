//! Geocoding outbound adapters.
//!
//! `MapTilerGeocoder` calls the MapTiler HTTP API. `DisabledGeocoder` stands
//! in when no API key is configured, so registration still succeeds with
//! donors stored without a location.

mod dto;
mod maptiler;

use async_trait::async_trait;

use crate::domain::ports::{GeocodedAddress, Geocoder, GeocoderError};

pub use maptiler::{DEFAULT_MAPTILER_BASE_URL, MapTilerConfigError, MapTilerGeocoder};

/// Geocoder that always reports itself as unconfigured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledGeocoder;

#[async_trait]
impl Geocoder for DisabledGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Option<GeocodedAddress>, GeocoderError> {
        Err(GeocoderError::disabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_geocoder_reports_disabled() {
        let result = DisabledGeocoder.geocode("Mumbai").await;
        assert_eq!(result, Err(GeocoderError::Disabled));
    }
}
