//! Cross-origin policy for the browser client.
//!
//! Only listed origins may call the API from a browser, with credentials.
//! Requests without an `Origin` header (curl, server-to-server) pass through.

use actix_cors::Cors;
use actix_web::http::{Method, header};
use thiserror::Error;
use url::Url;

use crate::domain::TRACE_ID_HEADER;

/// Origins served by the bundled client during development.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:3001",
    "http://127.0.0.1:3001",
];

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Rejected entry in the origin allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid CORS origin `{origin}`: {reason}")]
pub struct CorsOriginError {
    origin: String,
    reason: &'static str,
}

impl CorsOriginError {
    fn new(origin: &str, reason: &'static str) -> Self {
        Self {
            origin: origin.to_owned(),
            reason,
        }
    }
}

/// Validated list of browser origins allowed to call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedOrigins(Vec<String>);

impl Default for AllowedOrigins {
    fn default() -> Self {
        Self(DEFAULT_ALLOWED_ORIGINS.map(str::to_owned).to_vec())
    }
}

impl AllowedOrigins {
    /// Validate and normalise a list of origins such as `https://donex.example`.
    ///
    /// # Errors
    ///
    /// Returns [`CorsOriginError`] for wildcards, non-HTTP schemes, or values
    /// carrying a path, query or fragment.
    pub fn parse<I, S>(origins: I) -> Result<Self, CorsOriginError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        origins
            .into_iter()
            .map(|origin| normalise(origin.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Normalised origins, in configuration order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Build the actix middleware enforcing this allowlist.
    pub fn middleware(&self) -> Cors {
        self.0
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods([Method::GET, Method::POST])
            .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers([TRACE_ID_HEADER])
            .supports_credentials()
            .max_age(PREFLIGHT_MAX_AGE_SECS)
    }
}

fn normalise(raw: &str) -> Result<String, CorsOriginError> {
    let trimmed = raw.trim();
    if trimmed == "*" {
        return Err(CorsOriginError::new(trimmed, "wildcards cannot carry credentials"));
    }
    let url = Url::parse(trimmed).map_err(|_| CorsOriginError::new(trimmed, "not a URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CorsOriginError::new(trimmed, "scheme must be http or https"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(CorsOriginError::new(trimmed, "must not include a path"));
    }
    Ok(url.origin().ascii_serialization())
}
