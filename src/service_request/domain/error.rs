//! Error types for service request validation and state changes.

use super::{RequestStatus, ServiceRequestId, TransitionAction};
use crate::error::ErrorCategory;
use thiserror::Error;

/// Errors returned by service request domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceRequestDomainError {
    /// The issue description is empty after trimming.
    #[error("issue description must not be empty")]
    EmptyIssueDescription,

    /// The chat message body is empty after trimming.
    #[error("chat message must not be empty")]
    EmptyChatMessage,

    /// The action does not apply to the request's current status.
    #[error("request {request_id} is already {from}, cannot {action}")]
    InvalidStateTransition {
        /// Request the action targeted.
        request_id: ServiceRequestId,
        /// Status at the time of the attempt.
        from: RequestStatus,
        /// Attempted action.
        action: TransitionAction,
    },

    /// Expiry applies only to pending requests.
    #[error("request {request_id} is {status}, only pending requests expire")]
    NotPending {
        /// Request the expiry targeted.
        request_id: ServiceRequestId,
        /// Current status.
        status: RequestStatus,
    },

    /// Only expired requests can be re-raised.
    #[error("request {request_id} is {status}, only expired requests can be re-raised")]
    NotExpired {
        /// Request the re-raise targeted.
        request_id: ServiceRequestId,
        /// Current status.
        status: RequestStatus,
    },

    /// Chat is open only while a request is accepted or in progress.
    #[error("chat for request {request_id} is closed while {status}")]
    ChatClosed {
        /// Request the message targeted.
        request_id: ServiceRequestId,
        /// Current status.
        status: RequestStatus,
    },

    /// The request has not reached a status that can be rated.
    #[error("request {request_id} cannot be rated while {status}")]
    NotRateable {
        /// Request the rating targeted.
        request_id: ServiceRequestId,
        /// Current status.
        status: RequestStatus,
    },

    /// The operation needs an assigned mechanic and there is none.
    #[error("request {0} has no assigned mechanic")]
    MissingAssignee(ServiceRequestId),
}

impl ServiceRequestDomainError {
    /// Returns the caller-facing failure category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyIssueDescription | Self::EmptyChatMessage => ErrorCategory::Validation,
            Self::InvalidStateTransition { .. }
            | Self::NotPending { .. }
            | Self::NotExpired { .. }
            | Self::ChatClosed { .. }
            | Self::NotRateable { .. }
            | Self::MissingAssignee(_) => ErrorCategory::State,
        }
    }
}

/// Error returned while parsing request statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown request status: {0}")]
pub struct ParseRequestStatusError(pub String);

/// Error returned while parsing dispatch modes from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown dispatch mode: {0}")]
pub struct ParseDispatchError(pub String);
