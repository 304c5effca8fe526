//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use donex::domain::ports::{DonorRepository, Geocoder, PasswordHasher, TokenIssuer};
use donex::inbound::http::config::ClientConfig;
use donex::inbound::http::cors::AllowedOrigins;

/// Adapters and settings needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repository: Arc<dyn DonorRepository>,
    pub(crate) geocoder: Arc<dyn Geocoder>,
    pub(crate) hasher: Arc<dyn PasswordHasher>,
    pub(crate) tokens: Arc<dyn TokenIssuer>,
    pub(crate) client_config: ClientConfig,
    pub(crate) allowed_origins: AllowedOrigins,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration from the driven adapters.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        repository: Arc<dyn DonorRepository>,
        geocoder: Arc<dyn Geocoder>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            bind_addr,
            repository,
            geocoder,
            hasher,
            tokens,
            client_config: ClientConfig::default(),
            allowed_origins: AllowedOrigins::default(),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Expose configuration values to the browser client.
    #[must_use]
    pub fn with_client_config(mut self, client_config: ClientConfig) -> Self {
        self.client_config = client_config;
        self
    }

    /// Restrict browser access to `allowed_origins`.
    #[must_use]
    pub fn with_allowed_origins(mut self, allowed_origins: AllowedOrigins) -> Self {
        self.allowed_origins = allowed_origins;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
