//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod config;
pub mod cors;
pub mod donors;
pub mod error;
pub mod health;
pub mod routes;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
