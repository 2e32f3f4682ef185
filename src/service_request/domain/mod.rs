//! Domain model for service requests, their state machine and chat.

mod action;
mod chat;
mod error;
mod ids;
mod issue;
mod policy;
mod request;
mod status;

pub use action::{AdminDecision, RequestAction, TransitionAction};
pub use chat::{ChatBody, ChatMessage, PersistedChatMessageData};
pub use error::{ParseDispatchError, ParseRequestStatusError, ServiceRequestDomainError};
pub use ids::{ChatMessageId, ServiceRequestId};
pub use issue::{IssueDescription, RequestDraft, RequestLocation};
pub use policy::{AccessPolicy, AuthorizationError, Relationship};
pub use request::{Dispatch, PersistedServiceRequestData, ServiceRequest};
pub use status::{RequestStatus, StatusCounts};
