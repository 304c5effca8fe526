//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed donor repository using Diesel
//! - **memory**: process-local donor repository for development and tests
//! - **geocoding**: MapTiler forward geocoding over reqwest
//! - **security**: Argon2 password hashing and HS256 bearer tokens
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod geocoding;
pub mod memory;
pub mod persistence;
pub mod security;
