//! Driven port for donor record storage.
//!
//! The repository exclusively owns stored records; callers receive clones.
//! Records are immutable once inserted and are never deleted.

use async_trait::async_trait;

use crate::domain::{BloodType, DonorId, DonorRecord, Email, NewDonor};

use super::define_port_error;

define_port_error! {
    /// Errors raised by donor repository adapters.
    pub enum DonorRepositoryError {
        /// A record with the same email already exists.
        DuplicateEmail => "email already registered",
        /// Repository connection could not be established.
        Connection { message: String } => "donor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "donor repository query failed: {message}",
    }
}

/// Persistence port for donor records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonorRepository: Send + Sync {
    /// Store a new record and return its assigned identifier.
    ///
    /// Fails with [`DonorRepositoryError::DuplicateEmail`] when the email is
    /// already taken.
    async fn insert(&self, donor: NewDonor) -> Result<DonorId, DonorRepositoryError>;

    /// Look up a record by exact email. `None` means no such record.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<DonorRecord>, DonorRepositoryError>;

    /// Return every record flagged as a donor, optionally narrowed to one
    /// blood type. Records without a location are included.
    async fn query_donors(
        &self,
        blood_type: Option<BloodType>,
    ) -> Result<Vec<DonorRecord>, DonorRepositoryError>;
}
