//! Repository port for ratings and legacy feedback.

use crate::identity::UserId;
use crate::rating::domain::{LegacyFeedback, MechanicRating};
use crate::service_request::domain::ServiceRequestId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for rating repository operations.
pub type RatingRepositoryResult<T> = Result<T, RatingRepositoryError>;

/// Rating and feedback persistence contract.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Inserts a rating, or revises the existing rating for the same request.
    ///
    /// A revision keeps the stored identifier and creation timestamp. The
    /// stored record is returned.
    async fn upsert(&self, rating: &MechanicRating) -> RatingRepositoryResult<MechanicRating>;

    /// Finds the rating attached to a request.
    async fn find_by_request(
        &self,
        request_id: ServiceRequestId,
    ) -> RatingRepositoryResult<Option<MechanicRating>>;

    /// Returns every rating received by a mechanic, newest first.
    async fn list_for_mechanic(
        &self,
        mechanic_id: UserId,
    ) -> RatingRepositoryResult<Vec<MechanicRating>>;

    /// Appends a legacy feedback record.
    async fn store_feedback(&self, feedback: &LegacyFeedback) -> RatingRepositoryResult<()>;

    /// Returns every legacy feedback record for a mechanic, newest first.
    async fn list_feedback_for_mechanic(
        &self,
        mechanic_id: UserId,
    ) -> RatingRepositoryResult<Vec<LegacyFeedback>>;
}

/// Errors returned by rating repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RatingRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RatingRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
