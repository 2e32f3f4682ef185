//! Rating submission and statistics.

mod rating;

pub use rating::{RatingService, RatingServiceError, RatingServiceResult, SubmitRating};
