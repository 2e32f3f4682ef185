//! Stored inbox entry.

use super::NotificationId;
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A message delivered to a user's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient: UserId,
    sender: Option<UserId>,
    message: String,
    link: Option<String>,
    is_read: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Persisted identifier.
    pub id: NotificationId,
    /// Persisted recipient.
    pub recipient: UserId,
    /// Persisted sender.
    pub sender: Option<UserId>,
    /// Persisted message text.
    pub message: String,
    /// Persisted deep link.
    pub link: Option<String>,
    /// Persisted read flag.
    pub is_read: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification stamped with the current clock time.
    #[must_use]
    pub fn new(
        recipient: UserId,
        sender: Option<UserId>,
        message: impl Into<String>,
        link: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient,
            sender,
            message: message.into(),
            link,
            is_read: false,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            recipient: data.recipient,
            sender: data.sender,
            message: data.message,
            link: data.link,
            is_read: data.is_read,
            created_at: data.created_at,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the sender, if the event had one.
    #[must_use]
    pub const fn sender(&self) -> Option<UserId> {
        self.sender
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the deep link, if any.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Returns whether the recipient has read the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.is_read
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flags the notification as read.
    pub const fn mark_read(&mut self) {
        self.is_read = true;
    }
}
