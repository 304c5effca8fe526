//! DTOs for decoding MapTiler geocoding responses.
//!
//! Only the fields the adapter needs are modelled. MapTiler returns a GeoJSON
//! `FeatureCollection`; each feature's `center` is `[longitude, latitude]`.

use serde::Deserialize;

use crate::domain::Coordinates;
use crate::domain::ports::GeocodedAddress;

#[derive(Debug, Deserialize)]
pub(super) struct GeocodingResponseDto {
    #[serde(default)]
    pub(super) features: Vec<FeatureDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FeatureDto {
    pub(super) center: Option<Vec<f64>>,
    pub(super) place_name: Option<String>,
}

impl GeocodingResponseDto {
    /// Best match, or `None` when the provider returned no features.
    pub(super) fn into_best_match(self) -> Result<Option<GeocodedAddress>, String> {
        let Some(feature) = self.features.into_iter().next() else {
            return Ok(None);
        };
        let (longitude, latitude) = match feature.center.as_deref() {
            Some([longitude, latitude, ..]) => (*longitude, *latitude),
            _ => return Err("first feature has no [lon, lat] center".to_owned()),
        };
        let coordinates =
            Coordinates::try_new(latitude, longitude).map_err(|err| err.to_string())?;
        Ok(Some(GeocodedAddress {
            coordinates,
            place_name: feature.place_name,
        }))
    }
}
