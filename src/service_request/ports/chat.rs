//! Repository port for chat messages.

use crate::service_request::domain::{ChatMessage, ServiceRequestId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for chat repository operations.
pub type ChatRepositoryResult<T> = Result<T, ChatRepositoryError>;

/// Chat message persistence contract.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Appends a message.
    async fn store(&self, message: &ChatMessage) -> ChatRepositoryResult<()>;

    /// Returns every message for a request, oldest first.
    async fn list_for_request(
        &self,
        request_id: ServiceRequestId,
    ) -> ChatRepositoryResult<Vec<ChatMessage>>;
}

/// Errors returned by chat repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ChatRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChatRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
