//! Chat messages between a customer and the assigned mechanic.

use super::{ChatMessageId, ServiceRequest, ServiceRequestDomainError, ServiceRequestId};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Chat message text, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChatBody(String);

impl ChatBody {
    /// Creates a validated message body.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestDomainError::EmptyChatMessage`] when the text
    /// is blank.
    pub fn new(text: impl Into<String>) -> Result<Self, ServiceRequestDomainError> {
        let raw = text.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ServiceRequestDomainError::EmptyChatMessage);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the message text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ChatBody {
    type Error = ServiceRequestDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChatBody> for String {
    fn from(value: ChatBody) -> Self {
        value.0
    }
}

/// A message exchanged within one service request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: ChatMessageId,
    service_request_id: ServiceRequestId,
    sender: UserId,
    receiver: UserId,
    body: ChatBody,
    sent_at: DateTime<Utc>,
    is_read: bool,
}

/// Parameter object for reconstructing a persisted chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedChatMessageData {
    /// Persisted identifier.
    pub id: ChatMessageId,
    /// Persisted request reference.
    pub service_request_id: ServiceRequestId,
    /// Persisted sender.
    pub sender: UserId,
    /// Persisted receiver.
    pub receiver: UserId,
    /// Persisted body.
    pub body: ChatBody,
    /// Persisted send timestamp.
    pub sent_at: DateTime<Utc>,
    /// Persisted read flag.
    pub is_read: bool,
}

impl ChatMessage {
    /// Composes a message from `sender` to the other participant.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestDomainError::ChatClosed`] unless the request
    /// is accepted or in progress, and
    /// [`ServiceRequestDomainError::MissingAssignee`] when there is no
    /// counterpart to receive the message.
    pub fn compose(
        request: &ServiceRequest,
        sender: UserId,
        body: ChatBody,
        clock: &impl Clock,
    ) -> Result<Self, ServiceRequestDomainError> {
        if !request.status().allows_chat() {
            return Err(ServiceRequestDomainError::ChatClosed {
                request_id: request.id(),
                status: request.status(),
            });
        }
        let receiver = request
            .counterpart_of(sender)
            .ok_or(ServiceRequestDomainError::MissingAssignee(request.id()))?;
        Ok(Self {
            id: ChatMessageId::new(),
            service_request_id: request.id(),
            sender,
            receiver,
            body,
            sent_at: clock.utc(),
            is_read: false,
        })
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedChatMessageData) -> Self {
        Self {
            id: data.id,
            service_request_id: data.service_request_id,
            sender: data.sender,
            receiver: data.receiver,
            body: data.body,
            sent_at: data.sent_at,
            is_read: data.is_read,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> ChatMessageId {
        self.id
    }

    /// Returns the owning request.
    #[must_use]
    pub const fn service_request_id(&self) -> ServiceRequestId {
        self.service_request_id
    }

    /// Returns the sender.
    #[must_use]
    pub const fn sender(&self) -> UserId {
        self.sender
    }

    /// Returns the receiver.
    #[must_use]
    pub const fn receiver(&self) -> UserId {
        self.receiver
    }

    /// Returns the message body.
    #[must_use]
    pub const fn body(&self) -> &ChatBody {
        &self.body
    }

    /// Returns the send timestamp.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Returns whether the receiver has read the message.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.is_read
    }
}
