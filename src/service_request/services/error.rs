//! Error type shared by lifecycle operations.

use crate::error::ErrorCategory;
use crate::service_request::{
    domain::{AuthorizationError, ServiceRequestDomainError, ServiceRequestId},
    ports::ServiceRequestRepositoryError,
};
use thiserror::Error;

/// Service-level errors for request lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Validation or state rule failed.
    #[error(transparent)]
    Domain(#[from] ServiceRequestDomainError),
    /// The access policy denied the action.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// The request does not exist.
    #[error("service request not found: {0}")]
    NotFound(ServiceRequestId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ServiceRequestRepositoryError),
}

impl LifecycleError {
    /// Returns the caller-facing failure category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(err) => err.category(),
            Self::Authorization(_) => ErrorCategory::Authorization,
            Self::NotFound(_) | Self::Repository(ServiceRequestRepositoryError::NotFound(_)) => {
                ErrorCategory::NotFound
            }
            Self::Repository(ServiceRequestRepositoryError::StatusConflict { .. }) => {
                ErrorCategory::State
            }
            Self::Repository(
                ServiceRequestRepositoryError::DuplicateRequest(_)
                | ServiceRequestRepositoryError::Persistence(_),
            ) => ErrorCategory::Infrastructure,
        }
    }
}

/// Result type for lifecycle service operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;
