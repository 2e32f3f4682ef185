//! Expires pending requests nobody answered in time.

use crate::config::EngineConfig;
use crate::notification::{domain::LifecycleEvent, ports::NotificationSink, services::Notifier};
use crate::service_request::{
    domain::{RequestStatus, ServiceRequest},
    ports::{ServiceRequestRepository, ServiceRequestRepositoryResult},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// Idempotent maintenance sweep over stale pending requests.
///
/// Safe to call from a scheduler and lazily before listings. A request that
/// was answered between selection and update is skipped; a second sweep
/// finds nothing left to expire.
pub struct ExpiryReaper<R, N, C>
where
    R: ServiceRequestRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifier: Notifier<N, C>,
    clock: Arc<C>,
    threshold: TimeDelta,
}

impl<R, N, C> Clone for ExpiryReaper<R, N, C>
where
    R: ServiceRequestRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            notifier: self.notifier.clone(),
            clock: Arc::clone(&self.clock),
            threshold: self.threshold,
        }
    }
}

impl<R, N, C> ExpiryReaper<R, N, C>
where
    R: ServiceRequestRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a reaper using the expiry threshold from `config`.
    #[must_use]
    pub fn new(repository: Arc<R>, sink: Arc<N>, clock: Arc<C>, config: &EngineConfig) -> Self {
        Self {
            repository,
            notifier: Notifier::new(sink, Arc::clone(&clock)),
            clock,
            threshold: config.expiry_threshold(),
        }
    }

    /// Expires every pending request at least as old as the threshold and
    /// notifies each requester once. Returns the number expired.
    ///
    /// Failures on individual requests are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns a repository error only when the stale request query fails.
    pub async fn sweep_expired(&self) -> ServiceRequestRepositoryResult<usize> {
        let now = self.clock.utc();
        let cutoff = now
            .checked_sub_signed(self.threshold)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let stale = self.repository.list_stale_pending(cutoff).await?;

        let mut expired = 0_usize;
        for request in stale {
            if self.expire_one(request).await {
                expired = expired.saturating_add(1);
            }
        }
        if expired > 0 {
            info!(expired, %cutoff, "expired stale pending requests");
        }
        Ok(expired)
    }

    async fn expire_one(&self, mut request: ServiceRequest) -> bool {
        let request_id = request.id();
        if let Err(err) = request.expire(&*self.clock) {
            warn!(%request_id, error = %err, "skipping request that is no longer pending");
            return false;
        }
        if let Err(err) = self
            .repository
            .update_if_status(&request, RequestStatus::Pending)
            .await
        {
            warn!(%request_id, error = %err, "could not expire request");
            return false;
        }
        self.notifier
            .notify(
                request.requester(),
                None,
                LifecycleEvent::Expired { request_id },
            )
            .await;
        true
    }
}
