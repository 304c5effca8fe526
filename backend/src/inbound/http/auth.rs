//! Bearer-token authentication for protected handlers.
//!
//! Handlers take a [`BearerIdentity`] argument; extraction fails with `401`
//! when no token is presented and `403` when the token does not verify.

use std::future::{Ready, ready};

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use tracing::debug;

use crate::domain::{DonorId, Error};
use crate::inbound::http::state::HttpState;

/// Message returned when no bearer token accompanies a protected request.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied";
/// Message returned when the bearer token fails verification.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Identity of the donor whose bearer token authenticated the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerIdentity {
    pub donor_id: DonorId,
    pub email: String,
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn identify(req: &HttpRequest) -> Result<BearerIdentity, Error> {
    let state = req.app_data::<web::Data<HttpState>>().ok_or_else(|| {
        Error::internal("HTTP state is not registered for bearer authentication")
    })?;
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| Error::unauthorized(ACCESS_DENIED_MESSAGE))?;

    let claims = state.tokens.verify(token).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::forbidden(INVALID_TOKEN_MESSAGE)
    })?;
    Ok(BearerIdentity {
        donor_id: claims.donor_id(),
        email: claims.email,
    })
}

impl FromRequest for BearerIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identify(req))
    }
}
