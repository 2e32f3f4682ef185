//! Lifecycle events and their inbox rendering.

use super::Notification;
use crate::identity::UserId;
use crate::mechanic::domain::MechanicType;
use crate::rating::domain::StarRating;
use crate::service_request::domain::ServiceRequestId;
use mockable::Clock;

/// A request lifecycle change that produces an inbox entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A customer addressed a new request to a mechanic.
    RequestCreated {
        /// New request.
        request_id: ServiceRequestId,
        /// Requested service category.
        mechanic_type: MechanicType,
    },
    /// The mechanic accepted the request.
    Accepted {
        /// Accepted request.
        request_id: ServiceRequestId,
    },
    /// The mechanic rejected the request.
    Rejected {
        /// Rejected request.
        request_id: ServiceRequestId,
    },
    /// The mechanic started work.
    Started {
        /// Started request.
        request_id: ServiceRequestId,
    },
    /// The mechanic finished work.
    Completed {
        /// Completed request.
        request_id: ServiceRequestId,
    },
    /// No mechanic accepted the request in time.
    Expired {
        /// Expired request.
        request_id: ServiceRequestId,
    },
    /// The customer rated the mechanic.
    Rated {
        /// Rated request.
        request_id: ServiceRequestId,
        /// Submitted stars.
        stars: StarRating,
    },
}

impl LifecycleEvent {
    /// Returns the request the event concerns.
    #[must_use]
    pub const fn request_id(&self) -> ServiceRequestId {
        match *self {
            Self::RequestCreated { request_id, .. }
            | Self::Accepted { request_id }
            | Self::Rejected { request_id }
            | Self::Started { request_id }
            | Self::Completed { request_id }
            | Self::Expired { request_id }
            | Self::Rated { request_id, .. } => request_id,
        }
    }

    /// Renders the inbox message text.
    #[must_use]
    pub fn message(&self) -> String {
        match *self {
            Self::RequestCreated {
                request_id,
                mechanic_type,
            } => format!(
                "New {} service request #{request_id}.",
                mechanic_type.label()
            ),
            Self::Accepted { request_id } => {
                format!("Your service request #{request_id} has been accepted.")
            }
            Self::Rejected { request_id } => {
                format!("Your service request #{request_id} has been rejected.")
            }
            Self::Started { request_id } => {
                format!("Work on your service request #{request_id} has started.")
            }
            Self::Completed { request_id } => {
                format!("Your service request #{request_id} has been completed.")
            }
            Self::Expired { request_id } => format!(
                "Your service request #{request_id} expired (no mechanic accepted in time)."
            ),
            Self::Rated { stars, .. } => format!("You received a new {stars}-star rating."),
        }
    }

    /// Returns the deep link shown with the message, if any.
    ///
    /// Acceptance opens the request chat; every other event links to the
    /// request itself except expiry, which has nothing left to act on.
    #[must_use]
    pub fn link(&self) -> Option<String> {
        match *self {
            Self::Accepted { request_id } => Some(format!("/requests/{request_id}/chat")),
            Self::Expired { .. } => None,
            Self::RequestCreated { request_id, .. }
            | Self::Rejected { request_id }
            | Self::Started { request_id }
            | Self::Completed { request_id }
            | Self::Rated { request_id, .. } => Some(format!("/requests/{request_id}")),
        }
    }

    /// Builds the notification delivered to `recipient`.
    #[must_use]
    pub fn into_notification(
        self,
        recipient: UserId,
        sender: Option<UserId>,
        clock: &impl Clock,
    ) -> Notification {
        Notification::new(recipient, sender, self.message(), self.link(), clock)
    }
}
