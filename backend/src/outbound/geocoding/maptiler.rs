//! Reqwest-backed MapTiler geocoding adapter.
//!
//! The adapter owns transport details only: URL construction, timeout and
//! status mapping, and JSON decoding into the domain match. Error messages
//! never include the request URL because it carries the API key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use super::dto::GeocodingResponseDto;
use crate::domain::ports::{GeocodedAddress, Geocoder, GeocoderError};

/// Default MapTiler forward-geocoding endpoint.
pub const DEFAULT_MAPTILER_BASE_URL: &str = "https://api.maptiler.com/geocoding/";

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum MapTilerConfigError {
    /// The base URL cannot carry path segments.
    #[error("geocoding base URL must be hierarchical: {0}")]
    BaseUrl(Url),
    /// The HTTP client could not be built.
    #[error("failed to build geocoding HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// MapTiler forward geocoder.
pub struct MapTilerGeocoder {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl MapTilerGeocoder {
    /// Build an adapter using a reqwest client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` cannot be a base or the client cannot
    /// be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MapTilerConfigError> {
        if base_url.cannot_be_a_base() {
            return Err(MapTilerConfigError::BaseUrl(base_url));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn request_url(&self, address: &str) -> Result<Url, GeocoderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GeocoderError::transport("geocoding base URL cannot be a base"))?
            .pop_if_empty()
            .push(&format!("{address}.json"));
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl Geocoder for MapTilerGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, GeocoderError> {
        let url = self.request_url(address)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        parse_best_match(body.as_ref())
    }
}

fn parse_best_match(body: &[u8]) -> Result<Option<GeocodedAddress>, GeocoderError> {
    let decoded: GeocodingResponseDto = serde_json::from_slice(body).map_err(|error| {
        GeocoderError::decode(format!("invalid geocoding JSON payload: {error}"))
    })?;
    decoded.into_best_match().map_err(GeocoderError::decode)
}

fn map_transport_error(error: reqwest::Error) -> GeocoderError {
    let error = error.without_url();
    if error.is_timeout() {
        GeocoderError::timeout(error.to_string())
    } else {
        GeocoderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> GeocoderError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            GeocoderError::timeout(format!("status {}", status.as_u16()))
        }
        _ => GeocoderError::status(format!("status {}", status.as_u16())),
    }
}
