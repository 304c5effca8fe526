//! Route table for the JSON API.

use actix_web::{Scope, web};

use crate::inbound::http::config::client_config;
use crate::inbound::http::donors::search_donors;
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::users::{login, register};

/// Path prefix shared by every JSON endpoint.
pub const API_PREFIX: &str = "/api";

/// Scope mounting all `/api` handlers with JSON decode errors mapped to `400`.
///
/// Callers register [`HttpState`](crate::inbound::http::state::HttpState) as
/// app data.
pub fn api_scope() -> Scope {
    web::scope(API_PREFIX)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(register)
        .service(login)
        .service(search_donors)
        .service(client_config)
}
