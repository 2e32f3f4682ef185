//! Rating submission and aggregate reads.

use crate::error::ErrorCategory;
use crate::identity::{Actor, UserId};
use crate::notification::{domain::LifecycleEvent, ports::NotificationSink, services::Notifier};
use crate::rating::{
    domain::{
        LegacyFeedback, MechanicRating, NewRatingParams, RatingBreakdown, RatingDomainError,
        RatingSummary, Review, StarRating, merge_review_feed,
    },
    ports::{RatingRepository, RatingRepositoryError},
};
use crate::service_request::{
    domain::{
        AccessPolicy, AuthorizationError, RequestAction, ServiceRequest, ServiceRequestDomainError,
        ServiceRequestId,
    },
    ports::{ServiceRequestRepository, ServiceRequestRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// A customer's rating of the mechanic on one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRating {
    request_id: ServiceRequestId,
    stars: i64,
    feedback: Option<String>,
}

impl SubmitRating {
    /// Creates a submission; `stars` is validated on submit.
    #[must_use]
    pub const fn new(request_id: ServiceRequestId, stars: i64) -> Self {
        Self {
            request_id,
            stars,
            feedback: None,
        }
    }

    /// Attaches free-text feedback.
    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }
}

/// Service-level errors for rating operations.
#[derive(Debug, Error)]
pub enum RatingServiceError {
    /// The star value is out of range.
    #[error(transparent)]
    Rating(#[from] RatingDomainError),
    /// The request is not in a rateable state.
    #[error(transparent)]
    Request(#[from] ServiceRequestDomainError),
    /// The access policy denied the action.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// The request does not exist.
    #[error("service request not found: {0}")]
    NotFound(ServiceRequestId),
    /// Rating storage failed.
    #[error(transparent)]
    Ratings(#[from] RatingRepositoryError),
    /// Request storage failed.
    #[error(transparent)]
    Requests(#[from] ServiceRequestRepositoryError),
}

impl RatingServiceError {
    /// Returns the caller-facing failure category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Rating(_) => ErrorCategory::Validation,
            Self::Request(err) => err.category(),
            Self::Authorization(_) => ErrorCategory::Authorization,
            Self::NotFound(_) | Self::Requests(ServiceRequestRepositoryError::NotFound(_)) => {
                ErrorCategory::NotFound
            }
            Self::Ratings(_) | Self::Requests(_) => ErrorCategory::Infrastructure,
        }
    }
}

/// Result type for rating operations.
pub type RatingServiceResult<T> = Result<T, RatingServiceError>;

/// Records ratings against requests and computes per-mechanic statistics.
pub struct RatingService<G, R, N, C>
where
    G: RatingRepository,
    R: ServiceRequestRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    ratings: Arc<G>,
    requests: Arc<R>,
    notifier: Notifier<N, C>,
    clock: Arc<C>,
}

impl<G, R, N, C> Clone for RatingService<G, R, N, C>
where
    G: RatingRepository,
    R: ServiceRequestRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            ratings: Arc::clone(&self.ratings),
            requests: Arc::clone(&self.requests),
            notifier: self.notifier.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<G, R, N, C> RatingService<G, R, N, C>
where
    G: RatingRepository,
    R: ServiceRequestRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a rating service.
    #[must_use]
    pub fn new(ratings: Arc<G>, requests: Arc<R>, sink: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            ratings,
            requests,
            notifier: Notifier::new(sink, Arc::clone(&clock)),
            clock,
        }
    }

    /// Rates the mechanic assigned to a request, revising any earlier
    /// rating for the same request, and notifies the mechanic.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::Rating`] for stars outside `1..=5`,
    /// [`RatingServiceError::NotFound`] for an unknown request,
    /// [`RatingServiceError::Authorization`] unless the actor raised the
    /// request, and a state failure unless the request is accepted, in
    /// progress or completed with an assigned mechanic.
    pub async fn submit_rating(
        &self,
        actor: &Actor,
        submission: SubmitRating,
    ) -> RatingServiceResult<MechanicRating> {
        let stars = StarRating::new(submission.stars)?;
        let mut request = self.load(submission.request_id).await?;
        AccessPolicy::authorize(RequestAction::Rate, actor, Some(&request))?;
        let mechanic = request.rateable_assignee()?;

        let fresh = MechanicRating::new(
            NewRatingParams {
                service_request_id: request.id(),
                mechanic_id: mechanic,
                customer_id: actor.id(),
                rating: stars,
                feedback: submission.feedback,
            },
            &*self.clock,
        );
        let stored = self.ratings.upsert(&fresh).await?;
        request.record_rating(stars, stored.feedback().map(str::to_owned), &*self.clock);
        self.requests.update_rating(&request).await?;

        info!(
            request_id = %request.id(),
            %mechanic,
            %stars,
            "mechanic rated"
        );
        self.notifier
            .notify(
                mechanic,
                Some(actor.id()),
                LifecycleEvent::Rated {
                    request_id: request.id(),
                    stars,
                },
            )
            .await;
        Ok(stored)
    }

    /// Appends completion-form feedback for a completed request.
    ///
    /// # Errors
    ///
    /// Same ordering as [`Self::submit_rating`], except that the request
    /// must be completed.
    pub async fn submit_feedback(
        &self,
        actor: &Actor,
        request_id: ServiceRequestId,
        stars: i64,
        comment: Option<String>,
    ) -> RatingServiceResult<LegacyFeedback> {
        let rating = StarRating::new(stars)?;
        let mut request = self.load(request_id).await?;
        AccessPolicy::authorize(RequestAction::SubmitFeedback, actor, Some(&request))?;
        let mechanic = request.feedback_assignee()?;

        let feedback = LegacyFeedback::new(mechanic, actor.id(), rating, comment, &*self.clock);
        self.ratings.store_feedback(&feedback).await?;
        request.record_rating(rating, feedback.comment().map(str::to_owned), &*self.clock);
        self.requests.update_rating(&request).await?;
        info!(%request_id, %mechanic, stars = %rating, "completion feedback recorded");
        Ok(feedback)
    }

    /// Returns the mean rating for a mechanic, `0.0` when unrated.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::Ratings`] when the lookup fails.
    pub async fn average_rating(&self, mechanic: UserId) -> RatingServiceResult<f64> {
        Ok(self.summary(mechanic).await?.average())
    }

    /// Returns the per-star counts for a mechanic.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::Ratings`] when the lookup fails.
    pub async fn rating_breakdown(&self, mechanic: UserId) -> RatingServiceResult<RatingBreakdown> {
        let received = self.ratings.list_for_mechanic(mechanic).await?;
        Ok(RatingBreakdown::from_ratings(
            received.iter().map(MechanicRating::rating),
        ))
    }

    /// Returns the mean rating and review count for a mechanic.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::Ratings`] when the lookup fails.
    pub async fn summary(&self, mechanic: UserId) -> RatingServiceResult<RatingSummary> {
        let received = self.ratings.list_for_mechanic(mechanic).await?;
        Ok(RatingSummary::from_ratings(
            received.iter().map(MechanicRating::rating),
        ))
    }

    /// Returns completion feedback and ratings as one feed, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::Ratings`] when a lookup fails.
    pub async fn review_feed(&self, mechanic: UserId) -> RatingServiceResult<Vec<Review>> {
        let feedback = self.ratings.list_feedback_for_mechanic(mechanic).await?;
        let received = self.ratings.list_for_mechanic(mechanic).await?;
        Ok(merge_review_feed(&feedback, &received))
    }

    async fn load(&self, request_id: ServiceRequestId) -> RatingServiceResult<ServiceRequest> {
        self.requests
            .find_by_id(request_id)
            .await?
            .ok_or(RatingServiceError::NotFound(request_id))
    }
}
