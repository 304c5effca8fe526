//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DONEX_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence. Optional fields
//! fall back to the defaults exposed by the accessor methods.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::geocoding::DEFAULT_MAPTILER_BASE_URL;
use crate::outbound::security::DEFAULT_TOKEN_TTL_HOURS;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GEOCODING_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration for the DONEX server and its tools.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DONEX")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<IpAddr>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection URL; donors are kept in memory when unset.
    pub database_url: Option<String>,
    /// Secret for signing bearer tokens.
    pub jwt_secret: Option<String>,
    /// Permit a random per-process token secret in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Bearer token lifetime in hours.
    pub token_ttl_hours: Option<i64>,
    /// MapTiler API key; geocoding is disabled when unset.
    pub maptiler_api_key: Option<String>,
    /// Override for the MapTiler geocoding endpoint.
    pub maptiler_base_url: Option<String>,
    /// Geocoding request timeout in seconds.
    pub geocoding_timeout_secs: Option<u64>,
    /// Comma-separated browser origins allowed to call the API.
    pub cors_allowed_origins: Option<String>,
}

impl AppSettings {
    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Token lifetime, defaulting to 24 hours.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS))
    }

    /// Geocoding endpoint, defaulting to MapTiler's public API.
    pub fn maptiler_base_url(&self) -> &str {
        self.maptiler_base_url
            .as_deref()
            .unwrap_or(DEFAULT_MAPTILER_BASE_URL)
    }

    pub fn geocoding_timeout(&self) -> Duration {
        Duration::from_secs(
            self.geocoding_timeout_secs
                .unwrap_or(DEFAULT_GEOCODING_TIMEOUT_SECS),
        )
    }

    /// MapTiler key, treating a blank value as unset.
    pub fn maptiler_api_key(&self) -> Option<&str> {
        self.maptiler_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Configured CORS origins, or `None` to use the local-development list.
    pub fn cors_allowed_origins(&self) -> Option<Vec<&str>> {
        let origins: Vec<&str> = self
            .cors_allowed_origins
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect();
        (!origins.is_empty()).then_some(origins)
    }

    /// Database URL, treating a blank value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 10] = [
        "DONEX_HOST",
        "DONEX_PORT",
        "DONEX_DATABASE_URL",
        "DONEX_JWT_SECRET",
        "DONEX_ALLOW_EPHEMERAL_SECRET",
        "DONEX_TOKEN_TTL_HOURS",
        "DONEX_MAPTILER_API_KEY",
        "DONEX_MAPTILER_BASE_URL",
        "DONEX_GEOCODING_TIMEOUT_SECS",
        "DONEX_CORS_ALLOWED_ORIGINS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("donex")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:3000".parse().expect("addr"));
        assert_eq!(settings.token_ttl(), chrono::Duration::hours(24));
        assert_eq!(settings.maptiler_base_url(), DEFAULT_MAPTILER_BASE_URL);
        assert_eq!(settings.geocoding_timeout(), Duration::from_secs(10));
        assert!(settings.database_url().is_none());
        assert!(settings.maptiler_api_key().is_none());
        assert!(settings.jwt_secret.is_none());
        assert!(!settings.allow_ephemeral_secret);
        assert!(settings.cors_allowed_origins().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(VARS.map(|name| {
            let value = match name {
                "DONEX_HOST" => "127.0.0.1",
                "DONEX_PORT" => "8081",
                "DONEX_DATABASE_URL" => "postgres://donex@localhost/donex",
                "DONEX_JWT_SECRET" => "s3cret",
                "DONEX_ALLOW_EPHEMERAL_SECRET" => "true",
                "DONEX_TOKEN_TTL_HOURS" => "2",
                "DONEX_MAPTILER_API_KEY" => "map-key",
                "DONEX_MAPTILER_BASE_URL" => "http://localhost:9000/geocoding/",
                "DONEX_CORS_ALLOWED_ORIGINS" => "https://donex.example, http://localhost:5173",
                _ => "3",
            };
            (name, Some(value.to_owned()))
        }));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:8081".parse().expect("addr"));
        assert_eq!(settings.database_url(), Some("postgres://donex@localhost/donex"));
        assert_eq!(settings.jwt_secret.as_deref(), Some("s3cret"));
        assert!(settings.allow_ephemeral_secret);
        assert_eq!(settings.token_ttl(), chrono::Duration::hours(2));
        assert_eq!(settings.maptiler_api_key(), Some("map-key"));
        assert_eq!(settings.maptiler_base_url(), "http://localhost:9000/geocoding/");
        assert_eq!(settings.geocoding_timeout(), Duration::from_secs(3));
        assert_eq!(
            settings.cors_allowed_origins(),
            Some(vec!["https://donex.example", "http://localhost:5173"])
        );
    }

    #[rstest]
    fn blank_optional_values_count_as_unset() {
        let _guard = lock_env(VARS.map(|name| {
            let value = match name {
                "DONEX_MAPTILER_API_KEY" | "DONEX_DATABASE_URL" => Some("   ".to_owned()),
                "DONEX_CORS_ALLOWED_ORIGINS" => Some(" , ".to_owned()),
                _ => None,
            };
            (name, value)
        }));

        let settings = load_from_empty_args();
        assert!(settings.maptiler_api_key().is_none());
        assert!(settings.database_url().is_none());
        assert!(settings.cors_allowed_origins().is_none());
    }
}
