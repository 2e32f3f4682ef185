//! Append-only feedback records from the completion feedback form.

use super::{FeedbackId, StarRating, normalize_feedback};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Feedback left through the older completion form.
///
/// Unlike [`super::MechanicRating`], several records may exist for the same
/// mechanic and customer; every submission appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyFeedback {
    id: FeedbackId,
    mechanic_id: UserId,
    customer_id: UserId,
    rating: StarRating,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing persisted feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFeedbackData {
    /// Persisted identifier.
    pub id: FeedbackId,
    /// Persisted mechanic reference.
    pub mechanic_id: UserId,
    /// Persisted customer reference.
    pub customer_id: UserId,
    /// Persisted star value.
    pub rating: StarRating,
    /// Persisted comment.
    pub comment: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl LegacyFeedback {
    /// Creates a feedback record stamped with the current clock time.
    #[must_use]
    pub fn new(
        mechanic_id: UserId,
        customer_id: UserId,
        rating: StarRating,
        comment: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: FeedbackId::new(),
            mechanic_id,
            customer_id,
            rating,
            comment: normalize_feedback(comment),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs feedback from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedFeedbackData) -> Self {
        Self {
            id: data.id,
            mechanic_id: data.mechanic_id,
            customer_id: data.customer_id,
            rating: data.rating,
            comment: data.comment,
            created_at: data.created_at,
        }
    }

    /// Returns the feedback identifier.
    #[must_use]
    pub const fn id(&self) -> FeedbackId {
        self.id
    }

    /// Returns the reviewed mechanic.
    #[must_use]
    pub const fn mechanic_id(&self) -> UserId {
        self.mechanic_id
    }

    /// Returns the reviewing customer.
    #[must_use]
    pub const fn customer_id(&self) -> UserId {
        self.customer_id
    }

    /// Returns the star value.
    #[must_use]
    pub const fn rating(&self) -> StarRating {
        self.rating
    }

    /// Returns the comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
