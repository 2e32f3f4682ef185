//! Validated latitude/longitude pairs and great-circle distance.

use super::GeoDomainError;
use serde::{Deserialize, Serialize};

/// Mean Earth radius used for haversine distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = GeoDomainError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// Creates validated coordinates.
    ///
    /// Out-of-range values are rejected, never clamped.
    ///
    /// # Errors
    ///
    /// Returns [`GeoDomainError::NonFiniteCoordinate`] for NaN or infinite
    /// input, otherwise the matching out-of-range variant.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoDomainError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(GeoDomainError::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoDomainError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoDomainError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds optional coordinates from a pair of optional components.
    ///
    /// # Errors
    ///
    /// Returns [`GeoDomainError::IncompleteCoordinates`] when exactly one
    /// component is present, or any error from [`Coordinates::new`].
    pub fn from_optional(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, GeoDomainError> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).map(Some),
            (None, None) => Ok(None),
            _ => Err(GeoDomainError::IncompleteCoordinates),
        }
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }

    /// Returns the haversine distance to `other` in kilometres.
    #[expect(
        clippy::float_arithmetic,
        reason = "great-circle distance is computed in floating point"
    )]
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// Rounds a value to two decimal places for display.
#[expect(
    clippy::float_arithmetic,
    reason = "display rounding of a floating-point distance"
)]
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
