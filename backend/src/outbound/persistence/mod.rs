//! PostgreSQL persistence adapters built on Diesel.

mod diesel_donor_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_donor_repository::DieselDonorRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
