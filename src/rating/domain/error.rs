//! Error types for rating validation.

use thiserror::Error;

/// Errors returned while constructing rating values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingDomainError {
    /// The star value lies outside `1..=5`.
    #[error("rating {0} is outside the range 1 to 5")]
    InvalidStarRating(i64),
}
