//! In-memory service request repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::UserId;
use crate::service_request::{
    domain::{RequestStatus, ServiceRequest, ServiceRequestId},
    ports::{
        ServiceRequestRepository, ServiceRequestRepositoryError, ServiceRequestRepositoryResult,
    },
};

/// Thread-safe in-memory request repository.
///
/// Compare-and-set updates run under a single write guard. Status and rating
/// writes each touch only their own fields, matching the column split of the
/// `PostgreSQL` adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceRequestRepository {
    state: Arc<RwLock<InMemoryRequestState>>,
}

#[derive(Debug, Default)]
struct InMemoryRequestState {
    requests: HashMap<ServiceRequestId, ServiceRequest>,
    insertion_order: Vec<ServiceRequestId>,
}

impl InMemoryRequestState {
    /// Requests matching `predicate`, newest first. Insertion order breaks
    /// timestamp ties, later inserts first.
    fn newest_first(&self, predicate: impl Fn(&ServiceRequest) -> bool) -> Vec<ServiceRequest> {
        let mut matching: Vec<ServiceRequest> = self
            .insertion_order
            .iter()
            .rev()
            .filter_map(|id| self.requests.get(id))
            .filter(|request| predicate(request))
            .cloned()
            .collect();
        matching.sort_by_key(|request| std::cmp::Reverse(request.created_at()));
        matching
    }
}

impl InMemoryServiceRequestRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ServiceRequestRepositoryError {
    ServiceRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ServiceRequestRepository for InMemoryServiceRequestRepository {
    async fn store(&self, request: &ServiceRequest) -> ServiceRequestRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.requests.contains_key(&request.id()) {
            return Err(ServiceRequestRepositoryError::DuplicateRequest(request.id()));
        }
        state.insertion_order.push(request.id());
        state.requests.insert(request.id(), request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ServiceRequestId,
    ) -> ServiceRequestRepositoryResult<Option<ServiceRequest>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.requests.get(&id).cloned())
    }

    async fn update_if_status(
        &self,
        request: &ServiceRequest,
        expected: RequestStatus,
    ) -> ServiceRequestRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .requests
            .get_mut(&request.id())
            .ok_or(ServiceRequestRepositoryError::NotFound(request.id()))?;
        if stored.status() != expected {
            return Err(ServiceRequestRepositoryError::StatusConflict {
                id: request.id(),
                expected,
                actual: stored.status(),
            });
        }
        stored.merge_status_fields(request);
        Ok(())
    }

    async fn update_rating(&self, request: &ServiceRequest) -> ServiceRequestRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .requests
            .get_mut(&request.id())
            .ok_or(ServiceRequestRepositoryError::NotFound(request.id()))?;
        stored.merge_rating_fields(request);
        Ok(())
    }

    async fn list_for_requester(
        &self,
        requester: UserId,
    ) -> ServiceRequestRepositoryResult<Vec<ServiceRequest>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.newest_first(|request| request.requester() == requester))
    }

    async fn list_for_assignee(
        &self,
        assignee: UserId,
        status: Option<RequestStatus>,
    ) -> ServiceRequestRepositoryResult<Vec<ServiceRequest>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.newest_first(|request| {
            request.assignee() == Some(assignee)
                && status.is_none_or(|wanted| request.status() == wanted)
        }))
    }

    async fn list_stale_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> ServiceRequestRepositoryResult<Vec<ServiceRequest>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut stale: Vec<ServiceRequest> = state
            .insertion_order
            .iter()
            .filter_map(|id| state.requests.get(id))
            .filter(|request| {
                request.status() == RequestStatus::Pending && request.created_at() <= cutoff
            })
            .cloned()
            .collect();
        stale.sort_by_key(ServiceRequest::created_at);
        Ok(stale)
    }
}
