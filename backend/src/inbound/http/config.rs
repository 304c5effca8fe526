//! Client configuration endpoint.
//!
//! ```text
//! GET /api/config
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::state::HttpState;

/// Settings the browser client needs to render maps and geocode searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// MapTiler key for map tiles, or `null` when maps are disabled.
    pub map_tiler_key: Option<String>,
}

/// Return client-side configuration.
#[utoipa::path(
    get,
    path = "/api/config",
    responses((status = 200, description = "Client configuration", body = ClientConfig)),
    tags = ["config"],
    operation_id = "clientConfig",
    security([])
)]
#[get("/config")]
pub async fn client_config(state: web::Data<HttpState>) -> web::Json<ClientConfig> {
    web::Json(state.client_config.clone())
}
