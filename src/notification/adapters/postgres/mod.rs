//! `PostgreSQL` notification inbox.

mod models;
mod repository;
mod schema;

pub use repository::{NotificationPgPool, PostgresNotificationInbox};
