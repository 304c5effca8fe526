//! Driving port for donor registration.

use async_trait::async_trait;

use crate::domain::{DonorId, Error, RegistrationRequest};

/// Use-case port called by inbound adapters to register a donor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Register a new donor and return the assigned identifier.
    async fn register(&self, request: RegistrationRequest) -> Result<DonorId, Error>;
}
