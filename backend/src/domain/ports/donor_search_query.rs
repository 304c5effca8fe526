//! Driving port for donor search.

use async_trait::async_trait;

use crate::domain::{DonorMatch, Error, SearchQuery};

/// Use-case port for finding donors near a point.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonorSearchQuery: Send + Sync {
    /// Run a search and return matches in result order.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<DonorMatch>, Error>;
}
