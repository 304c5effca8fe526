//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DonorSearchQuery, LoginService, RegistrationCommand, TokenIssuer};
use crate::inbound::http::config::ClientConfig;

/// Parameter object bundling the port implementations used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub registration: Arc<dyn RegistrationCommand>,
    pub login: Arc<dyn LoginService>,
    pub search: Arc<dyn DonorSearchQuery>,
    pub tokens: Arc<dyn TokenIssuer>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationCommand>,
    pub login: Arc<dyn LoginService>,
    pub search: Arc<dyn DonorSearchQuery>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub client_config: ClientConfig,
}

impl HttpState {
    /// Build state from domain ports and the configuration exposed to clients.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use donex::domain::ports::{DonorSearchQuery, LoginService, RegistrationCommand, TokenIssuer};
    /// use donex::inbound::http::config::ClientConfig;
    /// use donex::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// fn build(
    ///     registration: Arc<dyn RegistrationCommand>,
    ///     login: Arc<dyn LoginService>,
    ///     search: Arc<dyn DonorSearchQuery>,
    ///     tokens: Arc<dyn TokenIssuer>,
    /// ) -> HttpState {
    ///     HttpState::new(
    ///         HttpStatePorts { registration, login, search, tokens },
    ///         ClientConfig::default(),
    ///     )
    /// }
    /// ```
    pub fn new(ports: HttpStatePorts, client_config: ClientConfig) -> Self {
        let HttpStatePorts {
            registration,
            login,
            search,
            tokens,
        } = ports;
        Self {
            registration,
            login,
            search,
            tokens,
            client_config,
        }
    }
}
