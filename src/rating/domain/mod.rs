//! Domain model for ratings and review statistics.

mod error;
mod feedback;
mod ids;
mod rating;
mod review;
mod star;
mod summary;

pub use error::RatingDomainError;
pub use feedback::{LegacyFeedback, PersistedFeedbackData};
pub use ids::{FeedbackId, RatingId};
pub use rating::{MechanicRating, NewRatingParams, PersistedRatingData};
pub use review::{Review, ReviewSource, merge_review_feed};
pub use star::StarRating;
pub use summary::{RatingBreakdown, RatingSummary};

/// Trims free-text feedback, mapping blank input to `None`.
#[must_use]
pub fn normalize_feedback(feedback: Option<String>) -> Option<String> {
    feedback
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
