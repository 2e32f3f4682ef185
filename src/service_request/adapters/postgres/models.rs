//! Diesel row models for requests and chat.

use super::schema::{chat_messages, service_requests};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for service requests.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = service_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceRequestRow {
    /// Request identifier.
    pub id: uuid::Uuid,
    /// Requesting customer.
    pub requester_id: uuid::Uuid,
    /// Assigned mechanic.
    pub assignee_id: Option<uuid::Uuid>,
    /// Problem description.
    pub issue_description: String,
    /// Location label.
    pub location_label: String,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
    /// Service category.
    pub mechanic_type: String,
    /// Lifecycle status.
    pub status: String,
    /// Dispatch mode.
    pub dispatch: String,
    /// Latest rating.
    pub rating: Option<i16>,
    /// Latest feedback.
    pub feedback: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert row for chat messages.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatMessageRow {
    /// Message identifier.
    pub id: uuid::Uuid,
    /// Owning request.
    pub service_request_id: uuid::Uuid,
    /// Sender.
    pub sender_id: uuid::Uuid,
    /// Receiver.
    pub receiver_id: uuid::Uuid,
    /// Message text.
    pub body: String,
    /// Send timestamp.
    pub sent_at: DateTime<Utc>,
    /// Read flag.
    pub is_read: bool,
}
