//! OpenAPI documentation for the REST API.
//!
//! The generated document backs Swagger UI in debug builds and is printed by
//! the `openapi-dump` binary.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{BloodType, DonorMatch, DonorProfile, DonorSummary, Error, ErrorCode};
use crate::inbound::http::config::ClientConfig;
use crate::inbound::http::donors::{SearchRequest, SearchResponse};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::users::{
    AgeInput, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};

/// Name of the bearer-token security scheme.
pub const BEARER_AUTH: &str = "bearerAuth";

/// Registers the JWT bearer scheme used by `POST /api/donors`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        let mut scheme = Http::new(HttpAuthScheme::Bearer);
        scheme.bearer_format = Some("JWT".to_owned());
        scheme.description = Some("Token returned by POST /api/login.".to_owned());
        components.add_security_scheme(BEARER_AUTH, SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "DONEX blood donor directory API",
        description = "Donor registration, bearer-token login and proximity search."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::donors::search_donors,
        crate::inbound::http::config::client_config,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        BloodType,
        DonorProfile,
        DonorSummary,
        DonorMatch,
        AgeInput,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        SearchRequest,
        SearchResponse,
        ClientConfig,
        ProbeStatus,
    )),
    tags(
        (name = "users", description = "Donor registration and login"),
        (name = "donors", description = "Donor search"),
        (name = "config", description = "Client configuration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
