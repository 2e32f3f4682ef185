//! `PostgreSQL` inbox implementing both delivery and read ports.

use super::{models::NotificationRow, schema::notifications};
use crate::identity::UserId;
use crate::notification::{
    domain::{Notification, NotificationId, PersistedNotificationData},
    ports::{NotificationError, NotificationInbox, NotificationResult, NotificationSink},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by the notification adapter.
pub type NotificationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed notification inbox.
#[derive(Debug, Clone)]
pub struct PostgresNotificationInbox {
    pool: NotificationPgPool,
}

impl PostgresNotificationInbox {
    /// Creates a new inbox from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NotificationResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(NotificationError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NotificationError::persistence)?
    }
}

#[async_trait]
impl NotificationSink for PostgresNotificationInbox {
    async fn deliver(&self, notification: &Notification) -> NotificationResult<()> {
        let row = to_row(notification);
        self.run_blocking(move |connection| {
            diesel::insert_into(notifications::table)
                .values(&row)
                .execute(connection)
                .map_err(NotificationError::persistence)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl NotificationInbox for PostgresNotificationInbox {
    async fn list_for_recipient(
        &self,
        recipient: UserId,
        limit: usize,
    ) -> NotificationResult<Vec<Notification>> {
        let row_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run_blocking(move |connection| {
            let rows = notifications::table
                .filter(notifications::recipient_id.eq(recipient.into_inner()))
                .order(notifications::created_at.desc())
                .limit(row_limit)
                .select(NotificationRow::as_select())
                .load::<NotificationRow>(connection)
                .map_err(NotificationError::persistence)?;
            Ok(rows.into_iter().map(row_to_notification).collect())
        })
        .await
    }

    async fn mark_read(&self, id: NotificationId) -> NotificationResult<()> {
        self.run_blocking(move |connection| {
            let updated = diesel::update(notifications::table.find(id.into_inner()))
                .set(notifications::is_read.eq(true))
                .execute(connection)
                .map_err(NotificationError::persistence)?;
            if updated == 0 {
                return Err(NotificationError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(notification: &Notification) -> NotificationRow {
    NotificationRow {
        id: notification.id().into_inner(),
        recipient_id: notification.recipient().into_inner(),
        sender_id: notification.sender().map(UserId::into_inner),
        message: notification.message().to_owned(),
        link: notification.link().map(str::to_owned),
        is_read: notification.is_read(),
        created_at: notification.created_at(),
    }
}

fn row_to_notification(row: NotificationRow) -> Notification {
    Notification::from_persisted(PersistedNotificationData {
        id: NotificationId::from_uuid(row.id),
        recipient: UserId::from_uuid(row.recipient_id),
        sender: row.sender_id.map(UserId::from_uuid),
        message: row.message,
        link: row.link,
        is_read: row.is_read,
        created_at: row.created_at,
    })
}
