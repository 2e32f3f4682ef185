//! Append-only delivery port.

use crate::notification::domain::{Notification, NotificationId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification port operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Receives notifications produced by lifecycle side effects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Appends a notification to the recipient's inbox.
    async fn deliver(&self, notification: &Notification) -> NotificationResult<()>;
}

/// Errors returned by notification adapters.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// The notification does not exist.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
