//! `PostgreSQL` chat repository.

use super::{
    blocking::{ServiceRequestPgPool, run_blocking_with},
    models::ChatMessageRow,
    schema::chat_messages,
};
use crate::identity::UserId;
use crate::service_request::{
    domain::{ChatBody, ChatMessage, ChatMessageId, PersistedChatMessageData, ServiceRequestId},
    ports::{ChatRepository, ChatRepositoryError, ChatRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed chat repository.
#[derive(Debug, Clone)]
pub struct PostgresChatRepository {
    pool: ServiceRequestPgPool,
}

impl PostgresChatRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ServiceRequestPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PostgresChatRepository {
    async fn store(&self, message: &ChatMessage) -> ChatRepositoryResult<()> {
        let row = to_row(message);
        run_blocking_with(
            &self.pool,
            move |connection| {
                diesel::insert_into(chat_messages::table)
                    .values(&row)
                    .execute(connection)
                    .map_err(ChatRepositoryError::persistence)?;
                Ok(())
            },
            ChatRepositoryError::persistence,
            ChatRepositoryError::persistence,
        )
        .await
    }

    async fn list_for_request(
        &self,
        request_id: ServiceRequestId,
    ) -> ChatRepositoryResult<Vec<ChatMessage>> {
        run_blocking_with(
            &self.pool,
            move |connection| {
                let rows = chat_messages::table
                    .filter(chat_messages::service_request_id.eq(request_id.into_inner()))
                    .order((chat_messages::sent_at.asc(), chat_messages::id.asc()))
                    .select(ChatMessageRow::as_select())
                    .load::<ChatMessageRow>(connection)
                    .map_err(ChatRepositoryError::persistence)?;
                rows.into_iter().map(row_to_message).collect()
            },
            ChatRepositoryError::persistence,
            ChatRepositoryError::persistence,
        )
        .await
    }
}

fn to_row(message: &ChatMessage) -> ChatMessageRow {
    ChatMessageRow {
        id: message.id().into_inner(),
        service_request_id: message.service_request_id().into_inner(),
        sender_id: message.sender().into_inner(),
        receiver_id: message.receiver().into_inner(),
        body: message.body().as_str().to_owned(),
        sent_at: message.sent_at(),
        is_read: message.is_read(),
    }
}

fn row_to_message(row: ChatMessageRow) -> ChatRepositoryResult<ChatMessage> {
    let body = ChatBody::new(row.body).map_err(ChatRepositoryError::persistence)?;
    Ok(ChatMessage::from_persisted(PersistedChatMessageData {
        id: ChatMessageId::from_uuid(row.id),
        service_request_id: ServiceRequestId::from_uuid(row.service_request_id),
        sender: UserId::from_uuid(row.sender_id),
        receiver: UserId::from_uuid(row.receiver_id),
        body,
        sent_at: row.sent_at,
        is_read: row.is_read,
    }))
}
