//! Error types for geographic and mechanic-type validation.

use thiserror::Error;

/// Errors returned while constructing geographic values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeoDomainError {
    /// Latitude lies outside `[-90, 90]`.
    #[error("latitude {0} is outside the range [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude lies outside `[-180, 180]`.
    #[error("longitude {0} is outside the range [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// A coordinate is NaN or infinite.
    #[error("coordinates must be finite numbers")]
    NonFiniteCoordinate,

    /// Only one of latitude and longitude was supplied.
    #[error("latitude and longitude must be supplied together")]
    IncompleteCoordinates,
}

/// Error returned while parsing a mechanic type token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown mechanic type: {0}")]
pub struct ParseMechanicTypeError(pub String);
