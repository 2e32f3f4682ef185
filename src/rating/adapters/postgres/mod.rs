//! `PostgreSQL` adapters for ratings and legacy feedback.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresRatingRepository, RatingPgPool};
