//! Per-request mechanic rating record.

use super::{RatingId, StarRating, normalize_feedback};
use crate::identity::UserId;
use crate::service_request::domain::ServiceRequestId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A customer's rating of the mechanic who handled one service request.
///
/// Exactly one record exists per request; re-submission revises it in place
/// and keeps its identifier and creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MechanicRating {
    id: RatingId,
    service_request_id: ServiceRequestId,
    mechanic_id: UserId,
    customer_id: UserId,
    rating: StarRating,
    feedback: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for a fresh rating submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRatingParams {
    /// Rated request.
    pub service_request_id: ServiceRequestId,
    /// Mechanic receiving the rating.
    pub mechanic_id: UserId,
    /// Customer giving the rating.
    pub customer_id: UserId,
    /// Star value.
    pub rating: StarRating,
    /// Optional free-text feedback.
    pub feedback: Option<String>,
}

/// Parameter object for reconstructing a persisted rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRatingData {
    /// Persisted identifier.
    pub id: RatingId,
    /// Persisted request reference.
    pub service_request_id: ServiceRequestId,
    /// Persisted mechanic reference.
    pub mechanic_id: UserId,
    /// Persisted customer reference.
    pub customer_id: UserId,
    /// Persisted star value.
    pub rating: StarRating,
    /// Persisted feedback.
    pub feedback: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted revision timestamp.
    pub updated_at: DateTime<Utc>,
}

impl MechanicRating {
    /// Creates a rating record stamped with the current clock time.
    #[must_use]
    pub fn new(params: NewRatingParams, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: RatingId::new(),
            service_request_id: params.service_request_id,
            mechanic_id: params.mechanic_id,
            customer_id: params.customer_id,
            rating: params.rating,
            feedback: normalize_feedback(params.feedback),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a rating from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRatingData) -> Self {
        Self {
            id: data.id,
            service_request_id: data.service_request_id,
            mechanic_id: data.mechanic_id,
            customer_id: data.customer_id,
            rating: data.rating,
            feedback: data.feedback,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the rating identifier.
    #[must_use]
    pub const fn id(&self) -> RatingId {
        self.id
    }

    /// Returns the rated request.
    #[must_use]
    pub const fn service_request_id(&self) -> ServiceRequestId {
        self.service_request_id
    }

    /// Returns the rated mechanic.
    #[must_use]
    pub const fn mechanic_id(&self) -> UserId {
        self.mechanic_id
    }

    /// Returns the rating customer.
    #[must_use]
    pub const fn customer_id(&self) -> UserId {
        self.customer_id
    }

    /// Returns the star value.
    #[must_use]
    pub const fn rating(&self) -> StarRating {
        self.rating
    }

    /// Returns the feedback text, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest revision timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrites the mutable fields with a later submission for the same
    /// request, keeping this record's identifier and creation time.
    pub fn apply_resubmission(&mut self, resubmitted: &Self) {
        self.mechanic_id = resubmitted.mechanic_id;
        self.customer_id = resubmitted.customer_id;
        self.rating = resubmitted.rating;
        self.feedback.clone_from(&resubmitted.feedback);
        self.updated_at = resubmitted.updated_at;
    }
}
