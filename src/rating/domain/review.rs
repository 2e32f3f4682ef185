//! Combined review feed for a mechanic profile.

use super::{LegacyFeedback, MechanicRating, StarRating};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Origin of a review feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSource {
    /// Entry from the append-only feedback form.
    Feedback,
    /// Entry from a per-request rating.
    Rating,
}

/// One entry in a mechanic's review feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    /// Record origin.
    pub source: ReviewSource,
    /// Reviewing customer.
    pub customer_id: UserId,
    /// Star value.
    pub rating: StarRating,
    /// Comment, if any.
    pub comment: Option<String>,
    /// Creation time of the underlying record.
    pub created_at: DateTime<Utc>,
}

impl From<&LegacyFeedback> for Review {
    fn from(feedback: &LegacyFeedback) -> Self {
        Self {
            source: ReviewSource::Feedback,
            customer_id: feedback.customer_id(),
            rating: feedback.rating(),
            comment: feedback.comment().map(str::to_owned),
            created_at: feedback.created_at(),
        }
    }
}

impl From<&MechanicRating> for Review {
    fn from(rating: &MechanicRating) -> Self {
        Self {
            source: ReviewSource::Rating,
            customer_id: rating.customer_id(),
            rating: rating.rating(),
            comment: rating.feedback().map(str::to_owned),
            created_at: rating.created_at(),
        }
    }
}

/// Merges feedback and ratings into one newest-first feed.
///
/// Feedback entries are inserted before ratings; entries with equal
/// timestamps keep that insertion order.
#[must_use]
pub fn merge_review_feed(feedback: &[LegacyFeedback], ratings: &[MechanicRating]) -> Vec<Review> {
    let mut feed: Vec<Review> = feedback
        .iter()
        .map(Review::from)
        .chain(ratings.iter().map(Review::from))
        .collect();
    feed.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    feed
}
