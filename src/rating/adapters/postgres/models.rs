//! Diesel row models for ratings and legacy feedback.

use super::schema::{legacy_feedback, mechanic_ratings};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for ratings.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mechanic_ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MechanicRatingRow {
    /// Rating identifier.
    pub id: uuid::Uuid,
    /// Rated request.
    pub service_request_id: uuid::Uuid,
    /// Rated mechanic.
    pub mechanic_id: uuid::Uuid,
    /// Rating customer.
    pub customer_id: uuid::Uuid,
    /// Star value.
    pub rating: i16,
    /// Feedback text.
    pub feedback: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Revision timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for ratings.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mechanic_ratings)]
pub struct NewMechanicRatingRow {
    /// Rating identifier.
    pub id: uuid::Uuid,
    /// Rated request.
    pub service_request_id: uuid::Uuid,
    /// Rated mechanic.
    pub mechanic_id: uuid::Uuid,
    /// Rating customer.
    pub customer_id: uuid::Uuid,
    /// Star value.
    pub rating: i16,
    /// Feedback text.
    pub feedback: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Revision timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert row for legacy feedback.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = legacy_feedback)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LegacyFeedbackRow {
    /// Feedback identifier.
    pub id: uuid::Uuid,
    /// Reviewed mechanic.
    pub mechanic_id: uuid::Uuid,
    /// Reviewing customer.
    pub customer_id: uuid::Uuid,
    /// Star value.
    pub rating: i16,
    /// Comment text.
    pub comment: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
