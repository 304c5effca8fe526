//! Donor search: blood-type scan, distance annotation, radius filter and
//! nearest-first ordering.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::repository_error_mapping::map_repository_error;
use crate::domain::ports::{DonorRepository, DonorSearchQuery};
use crate::domain::{BloodType, Coordinates, DonorMatch, Error};

/// Search parameters.
///
/// `radius_km` only has an effect when `origin` is set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SearchQuery {
    /// Restrict results to one blood type.
    pub blood_type: Option<BloodType>,
    /// Point distances are measured from.
    pub origin: Option<Coordinates>,
    /// Maximum distance in kilometres, inclusive.
    pub radius_km: Option<f64>,
}

/// Domain service implementing [`DonorSearchQuery`].
#[derive(Clone)]
pub struct DonorSearchService {
    repository: Arc<dyn DonorRepository>,
}

impl DonorSearchService {
    /// Create a search service backed by `repository`.
    pub fn new(repository: Arc<dyn DonorRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl DonorSearchQuery for DonorSearchService {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<DonorMatch>, Error> {
        let candidates = self
            .repository
            .query_donors(query.blood_type)
            .await
            .map_err(map_repository_error)?;
        let scanned = candidates.len();

        let located = candidates
            .into_iter()
            .filter_map(|record| record.location.map(|point| (record.summary(), point)));

        let matches: Vec<DonorMatch> = match query.origin {
            None => located
                .map(|(donor, _)| DonorMatch {
                    donor,
                    distance_km: None,
                })
                .collect(),
            Some(origin) => {
                let mut hits: Vec<DonorMatch> = located
                    .map(|(donor, point)| DonorMatch {
                        donor,
                        distance_km: Some(origin.distance_km(point)),
                    })
                    .filter(|hit| match (query.radius_km, hit.distance_km) {
                        (Some(radius), Some(distance)) => distance <= radius,
                        _ => true,
                    })
                    .collect();
                // `sort_by` is stable, so equal distances keep repository order.
                hits.sort_by(|a, b| {
                    a.distance_km
                        .unwrap_or_default()
                        .total_cmp(&b.distance_km.unwrap_or_default())
                });
                hits
            }
        };

        debug!(
            scanned,
            returned = matches.len(),
            blood_type = query.blood_type.map(BloodType::as_str),
            "donor search completed"
        );
        Ok(matches)
    }
}
