//! Request lifecycle orchestration.

use super::{ExpiryReaper, LifecycleError, LifecycleResult};
use crate::config::EngineConfig;
use crate::identity::{Actor, UserId};
use crate::notification::{domain::LifecycleEvent, ports::NotificationSink, services::Notifier};
use crate::service_request::{
    domain::{
        AccessPolicy, AdminDecision, RequestAction, RequestDraft, RequestStatus, ServiceRequest,
        ServiceRequestDomainError, ServiceRequestId, StatusCounts, TransitionAction,
    },
    ports::{ServiceRequestRepository, ServiceRequestRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Creates requests, applies transitions and serves listings.
///
/// Authorization is decided by [`AccessPolicy`] before any state check.
/// Status writes use compare-and-set, so a caller that loses a race sees the
/// same state failure as one that arrives late.
pub struct RequestLifecycleService<R, N, C>
where
    R: ServiceRequestRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifier: Notifier<N, C>,
    reaper: ExpiryReaper<R, N, C>,
    clock: Arc<C>,
}

impl<R, N, C> Clone for RequestLifecycleService<R, N, C>
where
    R: ServiceRequestRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            notifier: self.notifier.clone(),
            reaper: self.reaper.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, N, C> RequestLifecycleService<R, N, C>
where
    R: ServiceRequestRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a lifecycle service.
    #[must_use]
    pub fn new(repository: Arc<R>, sink: Arc<N>, clock: Arc<C>, config: &EngineConfig) -> Self {
        Self {
            reaper: ExpiryReaper::new(
                Arc::clone(&repository),
                Arc::clone(&sink),
                Arc::clone(&clock),
                config,
            ),
            notifier: Notifier::new(sink, Arc::clone(&clock)),
            repository,
            clock,
        }
    }

    /// Creates a pending request addressed to `mechanic` and notifies them.
    ///
    /// The caller is responsible for checking that `mechanic` exists.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Authorization`] unless the actor is a
    /// customer, or a repository error when the write fails.
    pub async fn create_direct(
        &self,
        actor: &Actor,
        mechanic: UserId,
        draft: RequestDraft,
    ) -> LifecycleResult<ServiceRequest> {
        AccessPolicy::authorize(RequestAction::Create, actor, None)?;
        let request = ServiceRequest::new_direct(actor.id(), mechanic, draft, &*self.clock);
        self.repository.store(&request).await?;
        info!(
            request_id = %request.id(),
            requester = %actor.id(),
            %mechanic,
            "service request created"
        );
        self.notifier
            .notify(
                mechanic,
                Some(actor.id()),
                LifecycleEvent::RequestCreated {
                    request_id: request.id(),
                    mechanic_type: request.draft().mechanic_type(),
                },
            )
            .await;
        Ok(request)
    }

    /// Returns a request by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`] when the request does not exist.
    pub async fn find(&self, id: ServiceRequestId) -> LifecycleResult<ServiceRequest> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound(id))
    }

    /// Applies a mechanic transition and notifies the requester.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`], then
    /// [`LifecycleError::Authorization`], then a state failure
    /// ([`ServiceRequestDomainError::InvalidStateTransition`]) when the
    /// request is not in the required status or another writer got there
    /// first. A failed call leaves the request unchanged.
    pub async fn transition(
        &self,
        id: ServiceRequestId,
        actor: &Actor,
        action: TransitionAction,
    ) -> LifecycleResult<ServiceRequest> {
        let mut request = self.find(id).await?;
        AccessPolicy::authorize(action.into(), actor, Some(&request))?;

        let observed = request.status();
        request.apply(action, actor, &*self.clock)?;
        self.commit_status(&request, observed)
            .await
            .map_err(|err| lost_race_as_state_error(err, action))?;

        info!(
            request_id = %id,
            actor = %actor.id(),
            %action,
            from = %observed,
            to = %request.status(),
            "service request transitioned"
        );
        self.notifier
            .notify(
                request.requester(),
                Some(actor.id()),
                transition_event(action, id),
            )
            .await;
        Ok(request)
    }

    /// Forces `approved` or `rejected` from any status. No notification is
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Authorization`] unless the actor is an
    /// administrator, [`LifecycleError::NotFound`] when the request does not
    /// exist, or a state failure when the status changed concurrently.
    pub async fn admin_override(
        &self,
        id: ServiceRequestId,
        actor: &Actor,
        decision: AdminDecision,
    ) -> LifecycleResult<ServiceRequest> {
        AccessPolicy::authorize(RequestAction::AdminOverride, actor, None)?;
        let mut request = self.find(id).await?;
        let observed = request.status();
        request.override_status(decision, &*self.clock);
        self.commit_status(&request, observed).await?;
        info!(
            request_id = %id,
            admin = %actor.id(),
            from = %observed,
            to = %request.status(),
            "service request status overridden"
        );
        Ok(request)
    }

    /// Resubmits an expired request as a new broadcast request.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`], then
    /// [`LifecycleError::Authorization`] unless the actor raised the
    /// original, then [`ServiceRequestDomainError::NotExpired`] when the
    /// original is not expired.
    pub async fn re_raise(
        &self,
        id: ServiceRequestId,
        actor: &Actor,
    ) -> LifecycleResult<ServiceRequest> {
        let original = self.find(id).await?;
        AccessPolicy::authorize(RequestAction::ReRaise, actor, Some(&original))?;
        let raised = original.re_raise(&*self.clock)?;
        self.repository.store(&raised).await?;
        info!(
            original = %id,
            request_id = %raised.id(),
            "expired service request re-raised"
        );
        Ok(raised)
    }

    /// Lists the customer's own requests, newest first, after sweeping
    /// expired ones.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Authorization`] unless the actor is a
    /// customer, or a repository error.
    pub async fn requests_for_customer(&self, actor: &Actor) -> LifecycleResult<Vec<ServiceRequest>> {
        AccessPolicy::authorize(RequestAction::ListCustomerRequests, actor, None)?;
        self.reaper.sweep_expired().await?;
        Ok(self.repository.list_for_requester(actor.id()).await?)
    }

    /// Lists requests assigned to the mechanic, newest first, optionally
    /// filtered by status, after sweeping expired ones.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Authorization`] unless the actor is a
    /// mechanic, or a repository error.
    pub async fn requests_for_mechanic(
        &self,
        actor: &Actor,
        status: Option<RequestStatus>,
    ) -> LifecycleResult<Vec<ServiceRequest>> {
        AccessPolicy::authorize(RequestAction::ListMechanicRequests, actor, None)?;
        self.reaper.sweep_expired().await?;
        Ok(self.repository.list_for_assignee(actor.id(), status).await?)
    }

    /// Returns dashboard totals for the mechanic's requests.
    ///
    /// # Errors
    ///
    /// Same as [`Self::requests_for_mechanic`].
    pub async fn mechanic_status_counts(&self, actor: &Actor) -> LifecycleResult<StatusCounts> {
        let requests = self.requests_for_mechanic(actor, None).await?;
        Ok(StatusCounts::tally(&requests))
    }

    /// Runs the expiry sweep. See [`ExpiryReaper::sweep_expired`].
    ///
    /// # Errors
    ///
    /// Returns a repository error when the stale request query fails.
    pub async fn sweep_expired(&self) -> LifecycleResult<usize> {
        Ok(self.reaper.sweep_expired().await?)
    }

    async fn commit_status(
        &self,
        request: &ServiceRequest,
        observed: RequestStatus,
    ) -> LifecycleResult<()> {
        Ok(self.repository.update_if_status(request, observed).await?)
    }
}

/// Reports a lost compare-and-set the same way as a late arrival.
fn lost_race_as_state_error(err: LifecycleError, action: TransitionAction) -> LifecycleError {
    match err {
        LifecycleError::Repository(ServiceRequestRepositoryError::StatusConflict {
            id,
            actual,
            ..
        }) => LifecycleError::Domain(ServiceRequestDomainError::InvalidStateTransition {
            request_id: id,
            from: actual,
            action,
        }),
        other => other,
    }
}

const fn transition_event(action: TransitionAction, request_id: ServiceRequestId) -> LifecycleEvent {
    match action {
        TransitionAction::Accept => LifecycleEvent::Accepted { request_id },
        TransitionAction::Reject => LifecycleEvent::Rejected { request_id },
        TransitionAction::Start => LifecycleEvent::Started { request_id },
        TransitionAction::Complete => LifecycleEvent::Completed { request_id },
    }
}
