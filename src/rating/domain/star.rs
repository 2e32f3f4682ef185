//! Validated one-to-five star value.

use super::RatingDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A star rating between one and five inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct StarRating(u8);

impl StarRating {
    /// Lowest accepted value.
    pub const MIN: u8 = 1;
    /// Highest accepted value.
    pub const MAX: u8 = 5;

    /// Creates a validated star rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingDomainError::InvalidStarRating`] when `value` is not in
    /// `1..=5`.
    pub fn new(value: i64) -> Result<Self, RatingDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|stars| (Self::MIN..=Self::MAX).contains(stars))
            .map(Self)
            .ok_or(RatingDomainError::InvalidStarRating(value))
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for StarRating {
    type Error = RatingDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StarRating> for i64 {
    fn from(rating: StarRating) -> Self {
        Self::from(rating.0)
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
