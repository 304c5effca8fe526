//! Seeding of a fixed roster of test donors.
//!
//! Each donor is inserted through the same ports the server uses, so the
//! stored records carry real password hashes. Emails that already exist are
//! skipped, which makes repeated runs harmless.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{DonorRepository, DonorRepositoryError, PasswordHashError, PasswordHasher};
use crate::domain::{
    Age, BloodType, Coordinates, DonorValidationError, Email, NewDonor, UnknownBloodType,
};

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "password123";

/// One roster entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedDonor {
    pub name: &'static str,
    pub email: &'static str,
    pub age: i64,
    pub blood_type: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Donors in major Indian cities with known coordinates.
pub const TEST_DONORS: [SeedDonor; 6] = [
    SeedDonor {
        name: "Rajesh Kumar",
        email: "rajesh@gmail.com",
        age: 28,
        blood_type: "O+",
        address: "Mumbai, Maharashtra, India",
        phone: "+91-9876543210",
        latitude: 19.0760,
        longitude: 72.8777,
    },
    SeedDonor {
        name: "Priya Sharma",
        email: "priya@gmail.com",
        age: 25,
        blood_type: "A+",
        address: "Delhi, India",
        phone: "+91-9876543211",
        latitude: 28.7041,
        longitude: 77.1025,
    },
    SeedDonor {
        name: "Amit Patel",
        email: "amit@gmail.com",
        age: 32,
        blood_type: "B+",
        address: "Ahmedabad, Gujarat, India",
        phone: "+91-9876543212",
        latitude: 23.0225,
        longitude: 72.5714,
    },
    SeedDonor {
        name: "Kavita Singh",
        email: "kavita@gmail.com",
        age: 29,
        blood_type: "AB+",
        address: "Kolkata, West Bengal, India",
        phone: "+91-9876543213",
        latitude: 22.5726,
        longitude: 88.3639,
    },
    SeedDonor {
        name: "Suresh Reddy",
        email: "suresh@gmail.com",
        age: 35,
        blood_type: "O-",
        address: "Hyderabad, Telangana, India",
        phone: "+91-9876543214",
        latitude: 17.3850,
        longitude: 78.4867,
    },
    SeedDonor {
        name: "Meera Joshi",
        email: "meera@gmail.com",
        age: 30,
        blood_type: "A-",
        address: "Pune, Maharashtra, India",
        phone: "+91-9876543215",
        latitude: 18.5204,
        longitude: 73.8567,
    },
];

/// Errors raised while seeding.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// A roster entry failed domain validation.
    #[error("invalid seed donor {email}: {reason}")]
    InvalidDonor { email: &'static str, reason: String },
    /// Hashing the seed password failed.
    #[error(transparent)]
    Hash(#[from] PasswordHashError),
    /// The repository rejected a lookup or insert.
    #[error(transparent)]
    Repository(#[from] DonorRepositoryError),
}

/// Counts reported after a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Inserts roster donors that are not yet registered.
pub struct DonorSeeder {
    repository: Arc<dyn DonorRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

fn invalid(entry: &SeedDonor, reason: impl ToString) -> SeedingError {
    SeedingError::InvalidDonor {
        email: entry.email,
        reason: reason.to_string(),
    }
}

impl DonorSeeder {
    pub fn new(
        repository: Arc<dyn DonorRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            hasher,
            clock,
        }
    }

    async fn to_new_donor(&self, entry: &SeedDonor) -> Result<NewDonor, SeedingError> {
        let email = Email::new(entry.email).map_err(|err: DonorValidationError| invalid(entry, err))?;
        let age = Age::new(entry.age).map_err(|err| invalid(entry, err))?;
        let blood_type: BloodType = entry
            .blood_type
            .parse()
            .map_err(|err: UnknownBloodType| invalid(entry, err))?;
        let location =
            Coordinates::try_new(entry.latitude, entry.longitude).map_err(|err| invalid(entry, err))?;
        Ok(NewDonor {
            name: entry.name.to_owned(),
            email,
            password_hash: self.hasher.hash(SEED_PASSWORD).await?,
            age,
            blood_type,
            address: entry.address.to_owned(),
            phone: entry.phone.to_owned(),
            is_donor: true,
            location: Some(location),
            created_at: self.clock.utc(),
        })
    }

    /// Insert every roster entry whose email is not yet registered.
    pub async fn seed(&self, roster: &[SeedDonor]) -> Result<SeedReport, SeedingError> {
        let mut report = SeedReport::default();
        for entry in roster {
            let donor = self.to_new_donor(entry).await?;
            if self.repository.find_by_email(&donor.email).await?.is_some() {
                info!(email = entry.email, "seed donor already present; skipping");
                report.skipped += 1;
                continue;
            }
            match self.repository.insert(donor).await {
                Ok(id) => {
                    info!(donor_id = %id, email = entry.email, blood_type = entry.blood_type, "seed donor added");
                    report.inserted += 1;
                }
                Err(DonorRepositoryError::DuplicateEmail) => report.skipped += 1,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(report)
    }
}
