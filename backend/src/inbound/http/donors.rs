//! Donor search handler.
//!
//! ```text
//! POST /api/donors {"bloodType":"O+","latitude":19.076,"longitude":72.8777,"radius":25}
//! Authorization: Bearer <token>
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{BloodType, CoordinateError, Coordinates, DonorMatch, Error, SearchQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::state::HttpState;

/// Search filters for `POST /api/donors`. Every field is optional.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    /// Exact blood type label; blank means any type.
    #[schema(example = "O+")]
    pub blood_type: Option<String>,
    #[schema(example = 19.076)]
    pub latitude: Option<f64>,
    #[schema(example = 72.8777)]
    pub longitude: Option<f64>,
    /// Kilometres; unbounded when omitted. Ignored without a location.
    #[schema(example = 25.0)]
    pub radius: Option<f64>,
}

/// Search results, nearest first when a location was supplied.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub donors: Vec<DonorMatch>,
}

fn invalid(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn parse_blood_type(raw: Option<&str>) -> Result<Option<BloodType>, Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => label.parse().map(Some).map_err(|_| {
            invalid(
                "bloodType",
                "unknown_blood_type",
                format!("Unknown blood type: {label}"),
            )
        }),
    }
}

fn parse_origin(latitude: Option<f64>, longitude: Option<f64>) -> Result<Option<Coordinates>, Error> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(latitude), Some(longitude)) => Coordinates::try_new(latitude, longitude)
            .map(Some)
            .map_err(|err| match err {
                CoordinateError::Latitude(_) => invalid("latitude", "out_of_range", err.to_string()),
                CoordinateError::Longitude(_) => {
                    invalid("longitude", "out_of_range", err.to_string())
                }
            }),
        (Some(_), None) => Err(invalid(
            "longitude",
            "incomplete_location",
            "latitude and longitude must be supplied together",
        )),
        (None, Some(_)) => Err(invalid(
            "latitude",
            "incomplete_location",
            "latitude and longitude must be supplied together",
        )),
    }
}

fn parse_radius(radius: Option<f64>) -> Result<Option<f64>, Error> {
    match radius {
        Some(value) if !value.is_finite() || value <= 0.0 => Err(invalid(
            "radius",
            "invalid_radius",
            "radius must be a positive number of kilometres",
        )),
        other => Ok(other),
    }
}

impl TryFrom<SearchRequest> for SearchQuery {
    type Error = Error;

    fn try_from(body: SearchRequest) -> Result<Self, Self::Error> {
        let blood_type = parse_blood_type(body.blood_type.as_deref())?;
        let origin = parse_origin(body.latitude, body.longitude)?;
        let radius = parse_radius(body.radius)?;
        let radius_km = origin.and(radius);
        Ok(SearchQuery {
            blood_type,
            origin,
            radius_km,
        })
    }
}

/// Search donors by blood type and distance.
#[utoipa::path(
    post,
    path = "/api/donors",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching donors", body = SearchResponse),
        (status = 400, description = "Invalid filters", body = Error),
        (status = 401, description = "Missing bearer token", body = Error),
        (status = 403, description = "Invalid bearer token", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["donors"],
    operation_id = "searchDonors",
    security(("bearerAuth" = []))
)]
#[post("/donors")]
pub async fn search_donors(
    identity: BearerIdentity,
    state: web::Data<HttpState>,
    payload: web::Json<SearchRequest>,
) -> ApiResult<web::Json<SearchResponse>> {
    let query = SearchQuery::try_from(payload.into_inner())?;
    debug!(donor_id = %identity.donor_id, ?query, "donor search requested");
    let donors = state.search.search(&query).await?;
    Ok(web::Json(SearchResponse { donors }))
}
