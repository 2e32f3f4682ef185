//! Read side of the notification inbox.

use super::NotificationResult;
use crate::identity::UserId;
use crate::notification::domain::{Notification, NotificationId};
use async_trait::async_trait;

/// Dashboard access to delivered notifications.
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// Returns up to `limit` notifications for `recipient`, newest first.
    async fn list_for_recipient(
        &self,
        recipient: UserId,
        limit: usize,
    ) -> NotificationResult<Vec<Notification>>;

    /// Flags a notification as read.
    ///
    /// # Errors
    ///
    /// Returns [`super::NotificationError::NotFound`] when the notification
    /// does not exist.
    async fn mark_read(&self, id: NotificationId) -> NotificationResult<()>;
}
