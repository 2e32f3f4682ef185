//! Diesel row model for notifications.

use super::schema::notifications;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for notifications.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    /// Notification identifier.
    pub id: uuid::Uuid,
    /// Recipient user.
    pub recipient_id: uuid::Uuid,
    /// Sender user.
    pub sender_id: Option<uuid::Uuid>,
    /// Message text.
    pub message: String,
    /// Deep link.
    pub link: Option<String>,
    /// Read flag.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
