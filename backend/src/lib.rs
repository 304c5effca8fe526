//! DONEX blood-donor directory backend.
//!
//! Layout follows a hexagonal split: [`domain`] owns donor types, services
//! and ports; [`inbound`] adapts HTTP requests onto the driving ports; and
//! [`outbound`] implements the driven ports for PostgreSQL, MapTiler and
//! credential handling.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod seed;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
