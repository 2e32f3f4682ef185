//! In-memory inbox implementing both delivery and read ports.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::identity::UserId;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationError, NotificationInbox, NotificationResult, NotificationSink},
};

/// Thread-safe in-memory inbox keeping delivery order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationInbox {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationInbox {
    /// Creates an empty inbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every delivered notification in delivery order.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Persistence`] when the lock is poisoned.
    pub fn delivered(&self) -> NotificationResult<Vec<Notification>> {
        let notifications = self.notifications.read().map_err(lock_error)?;
        Ok(notifications.clone())
    }
}

fn lock_error(err: impl ToString) -> NotificationError {
    NotificationError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl NotificationSink for InMemoryNotificationInbox {
    async fn deliver(&self, notification: &Notification) -> NotificationResult<()> {
        let mut notifications = self.notifications.write().map_err(lock_error)?;
        notifications.push(notification.clone());
        Ok(())
    }
}

#[async_trait]
impl NotificationInbox for InMemoryNotificationInbox {
    async fn list_for_recipient(
        &self,
        recipient: UserId,
        limit: usize,
    ) -> NotificationResult<Vec<Notification>> {
        let notifications = self.notifications.read().map_err(lock_error)?;
        let mut matching: Vec<Notification> = notifications
            .iter()
            .filter(|notification| notification.recipient() == recipient)
            .cloned()
            .collect();
        // Latest delivery wins ties between equal timestamps.
        matching.reverse();
        matching.sort_by_key(|notification| std::cmp::Reverse(notification.created_at()));
        matching.truncate(limit);
        Ok(matching)
    }

    async fn mark_read(&self, id: NotificationId) -> NotificationResult<()> {
        let mut notifications = self.notifications.write().map_err(lock_error)?;
        let notification = notifications
            .iter_mut()
            .find(|notification| notification.id() == id)
            .ok_or(NotificationError::NotFound(id))?;
        notification.mark_read();
        Ok(())
    }
}
