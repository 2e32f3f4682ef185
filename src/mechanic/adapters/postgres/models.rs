//! Diesel row models for mechanic profiles.

use super::schema::mechanic_profiles;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for mechanic profiles.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = mechanic_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MechanicProfileRow {
    /// Mechanic identity.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub mechanic_id: uuid::Uuid,
    /// Shop name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub shop_name: String,
    /// Location label.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub location_label: String,
    /// Latitude.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Double>)]
    pub latitude: Option<f64>,
    /// Longitude.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Double>)]
    pub longitude: Option<f64>,
    /// Registered service categories.
    #[diesel(sql_type = diesel::sql_types::Array<diesel::sql_types::Text>)]
    pub mechanic_types: Vec<String>,
    /// Registration timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub registered_at: DateTime<Utc>,
}

/// Insert model for mechanic profiles. `registered_at` takes the column
/// default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mechanic_profiles)]
pub struct NewMechanicProfileRow {
    /// Mechanic identity.
    pub mechanic_id: uuid::Uuid,
    /// Shop name.
    pub shop_name: String,
    /// Location label.
    pub location_label: String,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
    /// Registered service categories.
    pub mechanic_types: Vec<String>,
}
