//! Chat gated by request participation and status.

use crate::error::ErrorCategory;
use crate::identity::Actor;
use crate::service_request::{
    domain::{
        AccessPolicy, AuthorizationError, ChatBody, ChatMessage, RequestAction, ServiceRequest,
        ServiceRequestDomainError, ServiceRequestId,
    },
    ports::{
        ChatRepository, ChatRepositoryError, ServiceRequestRepository,
        ServiceRequestRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for chat operations.
#[derive(Debug, Error)]
pub enum ChatServiceError {
    /// The access policy denied the action.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// The message or request state is invalid.
    #[error(transparent)]
    Domain(#[from] ServiceRequestDomainError),
    /// The request does not exist.
    #[error("service request not found: {0}")]
    NotFound(ServiceRequestId),
    /// Request lookup failed.
    #[error(transparent)]
    Requests(#[from] ServiceRequestRepositoryError),
    /// Chat storage failed.
    #[error(transparent)]
    Chat(#[from] ChatRepositoryError),
}

impl ChatServiceError {
    /// Returns the caller-facing failure category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Authorization(_) => ErrorCategory::Authorization,
            Self::Domain(err) => err.category(),
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Requests(_) | Self::Chat(_) => ErrorCategory::Infrastructure,
        }
    }
}

/// Result type for chat operations.
pub type ChatServiceResult<T> = Result<T, ChatServiceError>;

/// Sends and lists messages between a customer and the assigned mechanic.
pub struct ChatService<R, H, C>
where
    R: ServiceRequestRepository,
    H: ChatRepository,
    C: Clock + Send + Sync,
{
    requests: Arc<R>,
    chats: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> Clone for ChatService<R, H, C>
where
    R: ServiceRequestRepository,
    H: ChatRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            requests: Arc::clone(&self.requests),
            chats: Arc::clone(&self.chats),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, H, C> ChatService<R, H, C>
where
    R: ServiceRequestRepository,
    H: ChatRepository,
    C: Clock + Send + Sync,
{
    /// Creates a chat service.
    #[must_use]
    pub const fn new(requests: Arc<R>, chats: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            requests,
            chats,
            clock,
        }
    }

    /// Sends `body` to the other participant of the request.
    ///
    /// # Errors
    ///
    /// Returns [`ChatServiceError::NotFound`], then
    /// [`ChatServiceError::Authorization`] for non-participants, then a
    /// validation failure for a blank body, then
    /// [`ServiceRequestDomainError::ChatClosed`] unless the request is
    /// accepted or in progress.
    pub async fn send_message(
        &self,
        request_id: ServiceRequestId,
        actor: &Actor,
        body: &str,
    ) -> ChatServiceResult<ChatMessage> {
        let request = self.load(request_id).await?;
        AccessPolicy::authorize(RequestAction::SendChatMessage, actor, Some(&request))?;
        let text = ChatBody::new(body)?;
        let message = ChatMessage::compose(&request, actor.id(), text, &*self.clock)?;
        self.chats.store(&message).await?;
        Ok(message)
    }

    /// Returns the conversation, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ChatServiceError::NotFound`], then
    /// [`ChatServiceError::Authorization`] for non-participants.
    pub async fn history(
        &self,
        request_id: ServiceRequestId,
        actor: &Actor,
    ) -> ChatServiceResult<Vec<ChatMessage>> {
        let request = self.load(request_id).await?;
        AccessPolicy::authorize(RequestAction::ViewChat, actor, Some(&request))?;
        Ok(self.chats.list_for_request(request_id).await?)
    }

    async fn load(&self, request_id: ServiceRequestId) -> ChatServiceResult<ServiceRequest> {
        self.requests
            .find_by_id(request_id)
            .await?
            .ok_or(ChatServiceError::NotFound(request_id))
    }
}
