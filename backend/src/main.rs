//! DONEX server entry-point: loads settings, wires adapters and serves the API.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use donex::domain::ports::{DonorRepository, Geocoder, TokenIssuer};
use donex::inbound::http::config::ClientConfig;
use donex::inbound::http::cors::AllowedOrigins;
use donex::inbound::http::health::HealthState;
use donex::outbound::geocoding::{DisabledGeocoder, MapTilerGeocoder};
use donex::outbound::memory::InMemoryDonorRepository;
use donex::outbound::persistence::{
    DbPool, DieselDonorRepository, PoolConfig, run_pending_migrations,
};
use donex::outbound::security::{Argon2PasswordHasher, HmacTokenIssuer};
use donex::settings::AppSettings;
use server::{ServerConfig, create_server};

const EPHEMERAL_SECRET_LEN: usize = 32;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))?;

    let repository = build_repository(&settings).await?;
    let geocoder = build_geocoder(&settings)?;
    let tokens = build_token_issuer(&settings)?;
    let allowed_origins = build_allowed_origins(&settings)?;

    let config = ServerConfig::new(
        settings.bind_addr(),
        repository,
        geocoder,
        Arc::new(Argon2PasswordHasher::new()),
        tokens,
    )
    .with_client_config(ClientConfig {
        map_tiler_key: settings.maptiler_api_key().map(str::to_owned),
    })
    .with_allowed_origins(allowed_origins);

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %settings.bind_addr(), "starting DONEX server");
    create_server(health_state, config)?.await
}

async fn build_repository(settings: &AppSettings) -> io::Result<Arc<dyn DonorRepository>> {
    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; donors are kept in memory and lost on restart");
        return Ok(Arc::new(InMemoryDonorRepository::new()));
    };

    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
        .map_err(io::Error::other)?;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(io::Error::other)?;
    info!("using PostgreSQL donor repository");
    Ok(Arc::new(DieselDonorRepository::new(pool)))
}

fn build_geocoder(settings: &AppSettings) -> io::Result<Arc<dyn Geocoder>> {
    let Some(api_key) = settings.maptiler_api_key() else {
        warn!("no MapTiler API key configured; donors register without coordinates");
        return Ok(Arc::new(DisabledGeocoder));
    };
    let base_url = Url::parse(settings.maptiler_base_url())
        .map_err(|err| io::Error::other(format!("invalid MapTiler base URL: {err}")))?;
    let geocoder = MapTilerGeocoder::new(base_url, api_key, settings.geocoding_timeout())
        .map_err(io::Error::other)?;
    Ok(Arc::new(geocoder))
}

fn build_allowed_origins(settings: &AppSettings) -> io::Result<AllowedOrigins> {
    let origins = match settings.cors_allowed_origins() {
        Some(origins) => AllowedOrigins::parse(origins).map_err(io::Error::other)?,
        None => AllowedOrigins::default(),
    };
    info!(origins = ?origins.as_slice(), "CORS allowlist configured");
    Ok(origins)
}

fn build_token_issuer(settings: &AppSettings) -> io::Result<Arc<dyn TokenIssuer>> {
    let secret = match settings.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
        Some(secret) => secret.as_bytes().to_vec(),
        None if cfg!(debug_assertions) || settings.allow_ephemeral_secret => {
            warn!("using a temporary token secret; tokens will not survive a restart");
            let mut secret = vec![0_u8; EPHEMERAL_SECRET_LEN];
            OsRng.fill_bytes(&mut secret);
            secret
        }
        None => {
            return Err(io::Error::other(
                "DONEX_JWT_SECRET must be set (or DONEX_ALLOW_EPHEMERAL_SECRET for throwaway runs)",
            ));
        }
    };
    Ok(Arc::new(HmacTokenIssuer::new(
        secret,
        settings.token_ttl(),
        Arc::new(DefaultClock),
    )))
}

#[cfg(feature = "metrics")]
fn make_metrics() -> io::Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("donex")
        .endpoint("/metrics")
        .build()
        .map_err(|err| io::Error::other(format!("failed to configure Prometheus metrics: {err}")))
}
