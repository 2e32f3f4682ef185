//! Matcher result rows.

use super::MechanicProfile;
use crate::rating::domain::RatingSummary;
use serde::Serialize;

/// A candidate mechanic within the search radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyMechanic {
    profile: MechanicProfile,
    distance_km: f64,
    rating: RatingSummary,
}

impl NearbyMechanic {
    /// Creates a result row. `distance_km` is stored as given.
    #[must_use]
    pub const fn new(profile: MechanicProfile, distance_km: f64, rating: RatingSummary) -> Self {
        Self {
            profile,
            distance_km,
            rating,
        }
    }

    /// Returns the candidate profile.
    #[must_use]
    pub const fn profile(&self) -> &MechanicProfile {
        &self.profile
    }

    /// Returns the distance from the customer, rounded to two decimals.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Returns the mean rating, `0.0` when the mechanic has no ratings.
    #[must_use]
    pub const fn average_rating(&self) -> f64 {
        self.rating.average()
    }

    /// Returns the number of ratings received.
    #[must_use]
    pub const fn review_count(&self) -> u32 {
        self.rating.review_count()
    }
}
