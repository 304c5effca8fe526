//! Insert the test donor roster into the configured PostgreSQL database.
//!
//! Reads the same `DONEX_*` settings as the server; `DONEX_DATABASE_URL` is
//! required. Existing emails are skipped.

use std::io::Write;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use donex::outbound::persistence::{
    DbPool, DieselDonorRepository, PoolConfig, run_pending_migrations,
};
use donex::outbound::security::Argon2PasswordHasher;
use donex::seed::{DonorSeeder, SEED_PASSWORD, TEST_DONORS};
use donex::settings::AppSettings;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let database_url = settings
        .database_url()
        .ok_or_else(|| eyre!("DONEX_DATABASE_URL must be set to seed donors"))?
        .to_owned();

    let migration_url = database_url.clone();
    tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to apply migrations")?;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("failed to connect to the database")?;
    let seeder = DonorSeeder::new(
        Arc::new(DieselDonorRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(DefaultClock),
    );
    let report = seeder.seed(&TEST_DONORS).await.wrap_err("seeding failed")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "seeded {} donors ({} already present)",
        report.inserted, report.skipped
    )?;
    writeln!(stdout, "test logins (password {SEED_PASSWORD}):")?;
    for donor in &TEST_DONORS {
        writeln!(stdout, "  {} <{}> {}", donor.name, donor.email, donor.blood_type)?;
    }
    Ok(())
}
