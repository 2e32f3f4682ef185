//! Ranks registered mechanics by distance from a customer.

use crate::config::EngineConfig;
use crate::error::ErrorCategory;
use crate::mechanic::{
    domain::{Coordinates, GeoDomainError, MechanicType, NearbyMechanic, round_to_hundredths},
    ports::{MechanicDirectory, MechanicDirectoryError},
};
use crate::rating::{
    domain::{MechanicRating, RatingSummary},
    ports::{RatingRepository, RatingRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for proximity matching.
#[derive(Debug, Error)]
pub enum MatcherError {
    /// The search origin is not a valid coordinate pair.
    #[error(transparent)]
    Geo(#[from] GeoDomainError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] MechanicDirectoryError),
    /// Rating lookup failed.
    #[error(transparent)]
    Ratings(#[from] RatingRepositoryError),
}

impl MatcherError {
    /// Returns the caller-facing failure category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Geo(_) => ErrorCategory::Validation,
            Self::Directory(_) | Self::Ratings(_) => ErrorCategory::Infrastructure,
        }
    }
}

/// Result type for proximity matching.
pub type MatcherResult<T> = Result<T, MatcherError>;

/// Finds mechanics of a given type within the configured search radius.
pub struct ProximityMatcher<M, G>
where
    M: MechanicDirectory,
    G: RatingRepository,
{
    directory: Arc<M>,
    ratings: Arc<G>,
    radius_km: f64,
}

impl<M, G> Clone for ProximityMatcher<M, G>
where
    M: MechanicDirectory,
    G: RatingRepository,
{
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            ratings: Arc::clone(&self.ratings),
            radius_km: self.radius_km,
        }
    }
}

impl<M, G> ProximityMatcher<M, G>
where
    M: MechanicDirectory,
    G: RatingRepository,
{
    /// Creates a matcher using the search radius from `config`.
    #[must_use]
    pub const fn new(directory: Arc<M>, ratings: Arc<G>, config: &EngineConfig) -> Self {
        Self {
            directory,
            ratings,
            radius_km: config.search_radius_km(),
        }
    }

    /// Returns the search radius in kilometres.
    #[must_use]
    pub const fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Returns mechanics registered for `mechanic_type` within the search
    /// radius of (`latitude`, `longitude`), nearest first.
    ///
    /// Mechanics at equal distance keep directory order. An empty result
    /// means nobody is nearby and is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::Geo`] when the coordinates are out of range,
    /// before any lookup happens.
    pub async fn find_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        mechanic_type: MechanicType,
    ) -> MatcherResult<Vec<NearbyMechanic>> {
        let origin = Coordinates::new(latitude, longitude)?;
        self.find_near(origin, mechanic_type).await
    }

    /// Same as [`Self::find_nearby`] for an already validated origin.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::Directory`] or [`MatcherError::Ratings`] when
    /// a lookup fails.
    pub async fn find_near(
        &self,
        origin: Coordinates,
        mechanic_type: MechanicType,
    ) -> MatcherResult<Vec<NearbyMechanic>> {
        let candidates = self.directory.located_with_type(mechanic_type).await?;
        let candidate_count = candidates.len();

        let mut in_range: Vec<_> = candidates
            .into_iter()
            .filter_map(|profile| {
                let distance = profile.coordinates()?.distance_km(origin);
                (distance <= self.radius_km).then_some((profile, distance))
            })
            .collect();
        in_range.sort_by(|left, right| left.1.total_cmp(&right.1));

        let mut nearby = Vec::with_capacity(in_range.len());
        for (profile, distance) in in_range {
            let received = self.ratings.list_for_mechanic(profile.mechanic_id()).await?;
            let summary = RatingSummary::from_ratings(received.iter().map(MechanicRating::rating));
            nearby.push(NearbyMechanic::new(
                profile,
                round_to_hundredths(distance),
                summary,
            ));
        }

        debug!(
            %mechanic_type,
            candidates = candidate_count,
            matched = nearby.len(),
            radius_km = self.radius_km,
            "proximity match finished"
        );
        Ok(nearby)
    }
}
