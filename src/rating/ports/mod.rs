//! Port contracts for rating persistence.

pub mod repository;

pub use repository::{RatingRepository, RatingRepositoryError, RatingRepositoryResult};
