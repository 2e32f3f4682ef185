//! In-memory rating repository for tests and embedded use.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::identity::UserId;
use crate::rating::{
    domain::{LegacyFeedback, MechanicRating},
    ports::{RatingRepository, RatingRepositoryError, RatingRepositoryResult},
};
use crate::service_request::domain::ServiceRequestId;

/// Thread-safe in-memory rating repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRatingRepository {
    state: Arc<RwLock<InMemoryRatingState>>,
}

#[derive(Debug, Default)]
struct InMemoryRatingState {
    ratings: Vec<MechanicRating>,
    feedback: Vec<LegacyFeedback>,
}

impl InMemoryRatingRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> RatingRepositoryError {
    RatingRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn upsert(&self, rating: &MechanicRating) -> RatingRepositoryResult<MechanicRating> {
        let mut state = self.state.write().map_err(lock_error)?;
        let existing = state
            .ratings
            .iter_mut()
            .find(|stored| stored.service_request_id() == rating.service_request_id());
        if let Some(stored) = existing {
            stored.apply_resubmission(rating);
            return Ok(stored.clone());
        }
        state.ratings.push(rating.clone());
        Ok(rating.clone())
    }

    async fn find_by_request(
        &self,
        request_id: ServiceRequestId,
    ) -> RatingRepositoryResult<Option<MechanicRating>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .ratings
            .iter()
            .find(|rating| rating.service_request_id() == request_id)
            .cloned())
    }

    async fn list_for_mechanic(
        &self,
        mechanic_id: UserId,
    ) -> RatingRepositoryResult<Vec<MechanicRating>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut ratings: Vec<MechanicRating> = state
            .ratings
            .iter()
            .filter(|rating| rating.mechanic_id() == mechanic_id)
            .cloned()
            .collect();
        ratings.sort_by_key(|rating| std::cmp::Reverse(rating.created_at()));
        Ok(ratings)
    }

    async fn store_feedback(&self, feedback: &LegacyFeedback) -> RatingRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.feedback.push(feedback.clone());
        Ok(())
    }

    async fn list_feedback_for_mechanic(
        &self,
        mechanic_id: UserId,
    ) -> RatingRepositoryResult<Vec<LegacyFeedback>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut feedback: Vec<LegacyFeedback> = state
            .feedback
            .iter()
            .filter(|entry| entry.mechanic_id() == mechanic_id)
            .cloned()
            .collect();
        feedback.sort_by_key(|entry| std::cmp::Reverse(entry.created_at()));
        Ok(feedback)
    }
}
