//! Wiring of domain services onto the configured adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use donex::domain::ports::{DonorSearchQuery, LoginService, RegistrationCommand};
use donex::domain::{CredentialLoginService, DonorSearchService, RegistrationService};
use donex::inbound::http::state::{HttpState, HttpStatePorts};

use super::ServerConfig;

/// Build handler state from the server configuration.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let registration: Arc<dyn RegistrationCommand> = Arc::new(RegistrationService::new(
        config.repository.clone(),
        config.geocoder.clone(),
        config.hasher.clone(),
        Arc::new(DefaultClock),
    ));
    let login: Arc<dyn LoginService> = Arc::new(CredentialLoginService::new(
        config.repository.clone(),
        config.hasher.clone(),
        config.tokens.clone(),
    ));
    let search: Arc<dyn DonorSearchQuery> =
        Arc::new(DonorSearchService::new(config.repository.clone()));

    web::Data::new(HttpState::new(
        HttpStatePorts {
            registration,
            login,
            search,
            tokens: config.tokens.clone(),
        },
        config.client_config.clone(),
    ))
}
