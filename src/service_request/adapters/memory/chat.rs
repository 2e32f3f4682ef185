//! In-memory chat repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::service_request::{
    domain::{ChatMessage, ServiceRequestId},
    ports::{ChatRepository, ChatRepositoryError, ChatRepositoryResult},
};

/// Thread-safe in-memory chat log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChatRepository {
    messages: Arc<RwLock<Vec<ChatMessage>>>,
}

impl InMemoryChatRepository {
    /// Creates an empty chat log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ChatRepositoryError {
    ChatRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn store(&self, message: &ChatMessage) -> ChatRepositoryResult<()> {
        let mut messages = self.messages.write().map_err(lock_error)?;
        messages.push(message.clone());
        Ok(())
    }

    async fn list_for_request(
        &self,
        request_id: ServiceRequestId,
    ) -> ChatRepositoryResult<Vec<ChatMessage>> {
        let messages = self.messages.read().map_err(lock_error)?;
        let mut history: Vec<ChatMessage> = messages
            .iter()
            .filter(|message| message.service_request_id() == request_id)
            .cloned()
            .collect();
        history.sort_by_key(ChatMessage::sent_at);
        Ok(history)
    }
}
