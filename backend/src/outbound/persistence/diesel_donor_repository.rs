//! PostgreSQL-backed `DonorRepository` implementation using Diesel.
//!
//! Email uniqueness is enforced by the `users.email` unique constraint; a
//! violation on insert surfaces as `DonorRepositoryError::DuplicateEmail`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{DonorRepository, DonorRepositoryError};
use crate::domain::{
    Age, BloodType, Coordinates, DonorId, DonorRecord, Email, NewDonor, PasswordHash,
};

use super::models::{DonorRow, NewDonorRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `DonorRepository` port.
#[derive(Clone)]
pub struct DieselDonorRepository {
    pool: DbPool,
}

impl DieselDonorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DonorRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            DonorRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> DonorRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DonorRepositoryError::duplicate_email()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DonorRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => DonorRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => DonorRepositoryError::query("database query error"),
        _ => DonorRepositoryError::query("database error"),
    }
}

/// Convert a row to a domain record, rejecting values the schema should
/// never have admitted.
fn row_to_record(row: DonorRow) -> Result<DonorRecord, DonorRepositoryError> {
    let id = row.id;
    let corrupt = |field: &str| {
        warn!(donor_id = id, field, "stored donor row failed validation");
        DonorRepositoryError::query(format!("invalid stored {field} for donor {id}"))
    };

    let email = Email::new(&row.email).map_err(|_| corrupt("email"))?;
    let age = Age::new(i64::from(row.age)).map_err(|_| corrupt("age"))?;
    let blood_type = row
        .blood_type
        .parse::<BloodType>()
        .map_err(|_| corrupt("blood_type"))?;
    let location = match (row.latitude, row.longitude) {
        (Some(latitude), Some(longitude)) => {
            Some(Coordinates::try_new(latitude, longitude).map_err(|_| corrupt("location"))?)
        }
        _ => None,
    };

    Ok(DonorRecord {
        id: DonorId::new(id),
        name: row.name,
        email,
        password_hash: PasswordHash::new(row.password_hash),
        age,
        blood_type,
        address: row.address,
        phone: row.phone,
        is_donor: row.is_donor,
        location,
        created_at: row.created_at,
    })
}

#[async_trait]
impl DonorRepository for DieselDonorRepository {
    async fn insert(&self, donor: NewDonor) -> Result<DonorId, DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewDonorRow {
            name: donor.name.as_str(),
            email: donor.email.as_ref(),
            password_hash: donor.password_hash.as_str(),
            age: i16::from(donor.age.get()),
            blood_type: donor.blood_type.as_str(),
            address: donor.address.as_str(),
            phone: donor.phone.as_str(),
            is_donor: donor.is_donor,
            latitude: donor.location.map(|point| point.latitude()),
            longitude: donor.location.map(|point| point.longitude()),
            created_at: donor.created_at,
        };

        let id: i64 = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(DonorId::new(id))
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<DonorRecord>, DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(DonorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn query_donors(
        &self,
        blood_type: Option<BloodType>,
    ) -> Result<Vec<DonorRecord>, DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = users::table
            .filter(users::is_donor.eq(true))
            .select(DonorRow::as_select())
            .order(users::id.asc())
            .into_boxed();
        if let Some(blood_type) = blood_type {
            query = query.filter(users::blood_type.eq(blood_type.as_str()));
        }

        let rows: Vec<DonorRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_record).collect()
    }
}
