//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    DonorSearchQuery, LoginService, MockDonorSearchQuery, MockLoginService,
    MockRegistrationCommand, MockTokenIssuer, RegistrationCommand, TokenIssuer,
};
use crate::inbound::http::config::ClientConfig;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mock ports for handler tests; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub registration: MockRegistrationCommand,
    pub login: MockLoginService,
    pub search: MockDonorSearchQuery,
    pub tokens: MockTokenIssuer,
}

impl MockPorts {
    /// Wrap the mocks into handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        let registration: Arc<dyn RegistrationCommand> = Arc::new(self.registration);
        let login: Arc<dyn LoginService> = Arc::new(self.login);
        let search: Arc<dyn DonorSearchQuery> = Arc::new(self.search);
        let tokens: Arc<dyn TokenIssuer> = Arc::new(self.tokens);
        web::Data::new(HttpState::new(
            HttpStatePorts {
                registration,
                login,
                search,
                tokens,
            },
            ClientConfig {
                map_tiler_key: Some("test-map-key".to_owned()),
            },
        ))
    }
}
