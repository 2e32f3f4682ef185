//! Repository port for service request persistence.

use crate::identity::UserId;
use crate::service_request::domain::{RequestStatus, ServiceRequest, ServiceRequestId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for service request repository operations.
pub type ServiceRequestRepositoryResult<T> = Result<T, ServiceRequestRepositoryError>;

/// Service request persistence contract.
#[async_trait]
pub trait ServiceRequestRepository: Send + Sync {
    /// Stores a new request.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestRepositoryError::DuplicateRequest`] when the
    /// identifier already exists.
    async fn store(&self, request: &ServiceRequest) -> ServiceRequestRepositoryResult<()>;

    /// Finds a request by identifier.
    async fn find_by_id(
        &self,
        id: ServiceRequestId,
    ) -> ServiceRequestRepositoryResult<Option<ServiceRequest>>;

    /// Writes the status, assignee and timestamp of `request` only if the
    /// stored status still equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestRepositoryError::NotFound`] when the request
    /// does not exist and [`ServiceRequestRepositoryError::StatusConflict`]
    /// when another writer changed the status first.
    async fn update_if_status(
        &self,
        request: &ServiceRequest,
        expected: RequestStatus,
    ) -> ServiceRequestRepositoryResult<()>;

    /// Writes the rating, feedback and timestamp of `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestRepositoryError::NotFound`] when the request
    /// does not exist.
    async fn update_rating(&self, request: &ServiceRequest) -> ServiceRequestRepositoryResult<()>;

    /// Returns every request raised by `requester`, newest first.
    async fn list_for_requester(
        &self,
        requester: UserId,
    ) -> ServiceRequestRepositoryResult<Vec<ServiceRequest>>;

    /// Returns requests assigned to `assignee`, newest first, optionally
    /// restricted to one status.
    async fn list_for_assignee(
        &self,
        assignee: UserId,
        status: Option<RequestStatus>,
    ) -> ServiceRequestRepositoryResult<Vec<ServiceRequest>>;

    /// Returns pending requests created at or before `cutoff`, oldest first.
    async fn list_stale_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> ServiceRequestRepositoryResult<Vec<ServiceRequest>>;
}

/// Errors returned by service request repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ServiceRequestRepositoryError {
    /// A request with the same identifier already exists.
    #[error("duplicate service request identifier: {0}")]
    DuplicateRequest(ServiceRequestId),

    /// The request was not found.
    #[error("service request not found: {0}")]
    NotFound(ServiceRequestId),

    /// The stored status changed since the caller read it.
    #[error("service request {id} is {actual}, expected {expected}")]
    StatusConflict {
        /// Contended request.
        id: ServiceRequestId,
        /// Status the caller observed.
        expected: RequestStatus,
        /// Status found in storage.
        actual: RequestStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServiceRequestRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
