//! Actions callers perform on service requests.

use super::RequestStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mechanic-driven status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAction {
    /// Take the job.
    Accept,
    /// Decline the job.
    Reject,
    /// Begin work on an accepted job.
    Start,
    /// Finish the job.
    Complete,
}

impl TransitionAction {
    /// Returns the status the action moves a request into.
    #[must_use]
    pub const fn target_status(self) -> RequestStatus {
        match self {
            Self::Accept => RequestStatus::Accepted,
            Self::Reject => RequestStatus::Rejected,
            Self::Start => RequestStatus::InProgress,
            Self::Complete => RequestStatus::Completed,
        }
    }

    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Start => "start",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrative status override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminDecision {
    /// Force the request to `approved`.
    Approve,
    /// Force the request to `rejected`.
    Reject,
}

impl AdminDecision {
    /// Returns the forced status.
    #[must_use]
    pub const fn status(self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
        }
    }
}

/// Every action subject to the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestAction {
    /// Raise a new request addressed to a mechanic.
    Create,
    /// Mechanic status transition.
    Transition(TransitionAction),
    /// Resubmit an expired request.
    ReRaise,
    /// Rate the assigned mechanic.
    Rate,
    /// Leave feedback through the completion form.
    SubmitFeedback,
    /// Post a chat message.
    SendChatMessage,
    /// Read the chat history.
    ViewChat,
    /// List the caller's own requests as a customer.
    ListCustomerRequests,
    /// List requests addressed to the caller as a mechanic.
    ListMechanicRequests,
    /// Force a status as an administrator.
    AdminOverride,
}

impl From<TransitionAction> for RequestAction {
    fn from(action: TransitionAction) -> Self {
        Self::Transition(action)
    }
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create requests"),
            Self::Transition(action) => write!(f, "{action} requests"),
            Self::ReRaise => f.write_str("re-raise requests"),
            Self::Rate => f.write_str("rate mechanics"),
            Self::SubmitFeedback => f.write_str("submit feedback"),
            Self::SendChatMessage => f.write_str("send chat messages"),
            Self::ViewChat => f.write_str("view chat"),
            Self::ListCustomerRequests => f.write_str("list customer requests"),
            Self::ListMechanicRequests => f.write_str("list mechanic requests"),
            Self::AdminOverride => f.write_str("override request status"),
        }
    }
}
