//! In-process `DonorRepository` used when no database is configured.
//!
//! A single `RwLock` guards the store: inserts take the write lock for the
//! duplicate check and the append together, so two concurrent registrations
//! for one email cannot both succeed.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{DonorRepository, DonorRepositoryError};
use crate::domain::{BloodType, DonorId, DonorRecord, Email, NewDonor};

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    records: Vec<DonorRecord>,
}

/// Volatile donor repository backed by a `Vec` behind an `RwLock`.
///
/// Records come back in insertion (and therefore id) order.
#[derive(Debug, Default)]
pub struct InMemoryDonorRepository {
    store: RwLock<Store>,
}

impl InMemoryDonorRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn map_poison<T>(_: PoisonError<T>) -> DonorRepositoryError {
    DonorRepositoryError::query("donor store lock poisoned")
}

#[async_trait]
impl DonorRepository for InMemoryDonorRepository {
    async fn insert(&self, donor: NewDonor) -> Result<DonorId, DonorRepositoryError> {
        let mut store = self.store.write().map_err(map_poison)?;
        if store.records.iter().any(|record| record.email == donor.email) {
            return Err(DonorRepositoryError::duplicate_email());
        }
        store.last_id += 1;
        let id = DonorId::new(store.last_id);
        store.records.push(DonorRecord::from_new(id, donor));
        Ok(id)
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<DonorRecord>, DonorRepositoryError> {
        let store = self.store.read().map_err(map_poison)?;
        Ok(store
            .records
            .iter()
            .find(|record| &record.email == email)
            .cloned())
    }

    async fn query_donors(
        &self,
        blood_type: Option<BloodType>,
    ) -> Result<Vec<DonorRecord>, DonorRepositoryError> {
        let store = self.store.read().map_err(map_poison)?;
        Ok(store
            .records
            .iter()
            .filter(|record| record.is_donor)
            .filter(|record| blood_type.is_none_or(|wanted| record.blood_type == wanted))
            .cloned()
            .collect())
    }
}
