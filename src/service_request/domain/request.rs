//! Service request aggregate root.

use super::{
    AdminDecision, ParseDispatchError, RequestDraft, RequestStatus, ServiceRequestDomainError,
    ServiceRequestId, TransitionAction,
};
use crate::identity::{Actor, UserId};
use crate::rating::domain::{StarRating, normalize_feedback};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// How a request reaches mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// Addressed to one chosen mechanic, who alone may respond.
    Direct,
    /// Open to any mechanic; the first to accept claims it.
    Broadcast,
}

impl Dispatch {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Broadcast => "broadcast",
        }
    }
}

impl TryFrom<&str> for Dispatch {
    type Error = ParseDispatchError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "broadcast" => Ok(Self::Broadcast),
            _ => Err(ParseDispatchError(value.to_owned())),
        }
    }
}

/// A customer's request for mechanic assistance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    id: ServiceRequestId,
    requester: UserId,
    assignee: Option<UserId>,
    draft: RequestDraft,
    status: RequestStatus,
    dispatch: Dispatch,
    rating: Option<StarRating>,
    feedback: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted request.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedServiceRequestData {
    /// Persisted identifier.
    pub id: ServiceRequestId,
    /// Persisted requester.
    pub requester: UserId,
    /// Persisted assignee.
    pub assignee: Option<UserId>,
    /// Persisted content.
    pub draft: RequestDraft,
    /// Persisted status.
    pub status: RequestStatus,
    /// Persisted dispatch mode.
    pub dispatch: Dispatch,
    /// Persisted rating.
    pub rating: Option<StarRating>,
    /// Persisted feedback.
    pub feedback: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ServiceRequest {
    /// Creates a pending request addressed to `assignee`.
    #[must_use]
    pub fn new_direct(
        requester: UserId,
        assignee: UserId,
        draft: RequestDraft,
        clock: &impl Clock,
    ) -> Self {
        Self::new_pending(requester, Some(assignee), Dispatch::Direct, draft, clock)
    }

    fn new_pending(
        requester: UserId,
        assignee: Option<UserId>,
        dispatch: Dispatch,
        draft: RequestDraft,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ServiceRequestId::new(),
            requester,
            assignee,
            draft,
            status: RequestStatus::Pending,
            dispatch,
            rating: None,
            feedback: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedServiceRequestData) -> Self {
        Self {
            id: data.id,
            requester: data.requester,
            assignee: data.assignee,
            draft: data.draft,
            status: data.status,
            dispatch: data.dispatch,
            rating: data.rating,
            feedback: data.feedback,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> ServiceRequestId {
        self.id
    }

    /// Returns the requesting customer.
    #[must_use]
    pub const fn requester(&self) -> UserId {
        self.requester
    }

    /// Returns the assigned mechanic, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the request content.
    #[must_use]
    pub const fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Returns the dispatch mode.
    #[must_use]
    pub const fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Returns the recorded rating, if any.
    #[must_use]
    pub const fn rating(&self) -> Option<StarRating> {
        self.rating
    }

    /// Returns the recorded feedback, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the request is open for any mechanic to claim.
    #[must_use]
    pub const fn is_unclaimed_broadcast(&self) -> bool {
        matches!(self.dispatch, Dispatch::Broadcast) && self.assignee.is_none()
    }

    /// Returns whether `user` is the requester or the assignee.
    #[must_use]
    pub fn is_participant(&self, user: UserId) -> bool {
        self.requester == user || self.assignee == Some(user)
    }

    /// Returns the other party of a conversation with `user`.
    ///
    /// Returns `None` when `user` is not a participant or no mechanic is
    /// assigned yet.
    #[must_use]
    pub fn counterpart_of(&self, user: UserId) -> Option<UserId> {
        let assignee = self.assignee?;
        if user == self.requester {
            Some(assignee)
        } else if user == assignee {
            Some(self.requester)
        } else {
            None
        }
    }

    /// Applies a mechanic transition.
    ///
    /// Accepting an unclaimed broadcast request assigns `actor`. Access is
    /// checked by the caller through [`super::AccessPolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestDomainError::InvalidStateTransition`] when the
    /// current status does not allow `action`, which includes a broadcast
    /// that another mechanic already claimed. The request is unchanged.
    pub fn apply(
        &mut self,
        action: TransitionAction,
        actor: &Actor,
        clock: &impl Clock,
    ) -> Result<(), ServiceRequestDomainError> {
        let target = action.target_status();
        if !self.status.can_transition_to(target) {
            return Err(ServiceRequestDomainError::InvalidStateTransition {
                request_id: self.id,
                from: self.status,
                action,
            });
        }
        if action == TransitionAction::Accept
            && self.assignee.is_some_and(|assignee| assignee != actor.id())
        {
            return Err(ServiceRequestDomainError::InvalidStateTransition {
                request_id: self.id,
                from: self.status,
                action,
            });
        }
        if action == TransitionAction::Accept && self.assignee.is_none() {
            self.assignee = Some(actor.id());
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Returns whether the request has waited at least `threshold` without a
    /// response.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, threshold: TimeDelta) -> bool {
        self.status == RequestStatus::Pending
            && now.signed_duration_since(self.created_at) >= threshold
    }

    /// Moves a pending request to `expired`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestDomainError::NotPending`] when the request was
    /// answered or closed in the meantime.
    pub fn expire(&mut self, clock: &impl Clock) -> Result<(), ServiceRequestDomainError> {
        if !self.status.can_transition_to(RequestStatus::Expired) {
            return Err(ServiceRequestDomainError::NotPending {
                request_id: self.id,
                status: self.status,
            });
        }
        self.status = RequestStatus::Expired;
        self.touch(clock);
        Ok(())
    }

    /// Creates a fresh broadcast request from an expired one.
    ///
    /// The new request copies the issue, location, service category and
    /// coordinates, gets a new identifier and has no assignee. The original
    /// is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestDomainError::NotExpired`] when the request is
    /// not expired.
    pub fn re_raise(&self, clock: &impl Clock) -> Result<Self, ServiceRequestDomainError> {
        if self.status != RequestStatus::Expired {
            return Err(ServiceRequestDomainError::NotExpired {
                request_id: self.id,
                status: self.status,
            });
        }
        Ok(Self::new_pending(
            self.requester,
            None,
            Dispatch::Broadcast,
            self.draft.clone(),
            clock,
        ))
    }

    /// Forces the status chosen by an administrator, from any status.
    pub fn override_status(&mut self, decision: AdminDecision, clock: &impl Clock) {
        self.status = decision.status();
        self.touch(clock);
    }

    /// Returns the mechanic to credit with a rating.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestDomainError::NotRateable`] unless the request
    /// is accepted, in progress or completed, and
    /// [`ServiceRequestDomainError::MissingAssignee`] when nobody is
    /// assigned.
    pub fn rateable_assignee(&self) -> Result<UserId, ServiceRequestDomainError> {
        if !self.status.allows_rating() {
            return Err(ServiceRequestDomainError::NotRateable {
                request_id: self.id,
                status: self.status,
            });
        }
        self.assignee
            .ok_or(ServiceRequestDomainError::MissingAssignee(self.id))
    }

    /// Returns the mechanic to credit with completion-form feedback.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestDomainError::NotRateable`] unless the request
    /// is completed, and [`ServiceRequestDomainError::MissingAssignee`] when
    /// nobody is assigned.
    pub fn feedback_assignee(&self) -> Result<UserId, ServiceRequestDomainError> {
        if self.status != RequestStatus::Completed {
            return Err(ServiceRequestDomainError::NotRateable {
                request_id: self.id,
                status: self.status,
            });
        }
        self.assignee
            .ok_or(ServiceRequestDomainError::MissingAssignee(self.id))
    }

    /// Records the latest rating and feedback on the request.
    pub fn record_rating(
        &mut self,
        rating: StarRating,
        feedback: Option<String>,
        clock: &impl Clock,
    ) {
        self.rating = Some(rating);
        self.feedback = normalize_feedback(feedback);
        self.touch(clock);
    }

    /// Copies the columns a status write owns from `source`: status,
    /// assignee and the mutation timestamp. Rating fields are kept.
    pub const fn merge_status_fields(&mut self, source: &Self) {
        self.status = source.status;
        self.assignee = source.assignee;
        self.updated_at = source.updated_at;
    }

    /// Copies the columns a rating write owns from `source`: rating,
    /// feedback and the mutation timestamp. Status and assignee are kept.
    pub fn merge_rating_fields(&mut self, source: &Self) {
        self.rating = source.rating;
        self.feedback.clone_from(&source.feedback);
        self.updated_at = source.updated_at;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
