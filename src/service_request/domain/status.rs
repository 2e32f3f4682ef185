//! Request status state machine.

use super::{ParseRequestStatusError, ServiceRequest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Service request lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Waiting for a mechanic to respond.
    Pending,
    /// A mechanic took the job.
    Accepted,
    /// The mechanic started work.
    InProgress,
    /// Work finished.
    Completed,
    /// The mechanic declined, or an administrator rejected the request.
    Rejected,
    /// No mechanic responded before the expiry threshold.
    Expired,
    /// Administrative approval. Carries no downstream behaviour.
    Approved,
}

impl RequestStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Accepted,
        Self::InProgress,
        Self::Completed,
        Self::Rejected,
        Self::Expired,
        Self::Approved,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
            Self::Approved => "approved",
        }
    }

    /// Returns whether the state machine allows moving to `target`.
    ///
    /// Administrative overrides bypass this graph.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Pending,
                Self::Accepted | Self::Rejected | Self::Expired | Self::Approved
            ) | (Self::Accepted, Self::InProgress | Self::Completed)
                | (Self::InProgress, Self::Completed)
        )
    }

    /// Returns whether no lifecycle transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Rejected | Self::Expired | Self::Approved
        )
    }

    /// Returns whether the participants may chat in this status.
    #[must_use]
    pub const fn allows_chat(self) -> bool {
        matches!(self, Self::Accepted | Self::InProgress)
    }

    /// Returns whether the customer may rate the mechanic in this status.
    #[must_use]
    pub const fn allows_rating(self) -> bool {
        matches!(self, Self::Accepted | Self::InProgress | Self::Completed)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RequestStatus {
    type Error = ParseRequestStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            "expired" => Ok(Self::Expired),
            "approved" => Ok(Self::Approved),
            _ => Err(ParseRequestStatusError(value.to_owned())),
        }
    }
}

/// Per-status request totals shown on the mechanic dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Requests waiting for a response.
    pub pending: usize,
    /// Accepted requests not yet started.
    pub accepted: usize,
    /// Requests being worked on.
    pub in_progress: usize,
    /// Finished requests.
    pub completed: usize,
    /// Declined requests.
    pub rejected: usize,
}

impl StatusCounts {
    /// Tallies `requests` by status. Expired and approved requests are not
    /// counted.
    #[must_use]
    pub fn tally<'a>(requests: impl IntoIterator<Item = &'a ServiceRequest>) -> Self {
        let mut counts = Self::default();
        for request in requests {
            let slot = match request.status() {
                RequestStatus::Pending => &mut counts.pending,
                RequestStatus::Accepted => &mut counts.accepted,
                RequestStatus::InProgress => &mut counts.in_progress,
                RequestStatus::Completed => &mut counts.completed,
                RequestStatus::Rejected => &mut counts.rejected,
                RequestStatus::Expired | RequestStatus::Approved => continue,
            };
            *slot = slot.saturating_add(1);
        }
        counts
    }
}
