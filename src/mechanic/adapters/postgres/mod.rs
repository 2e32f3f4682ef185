//! `PostgreSQL` adapters for mechanic profiles.

mod models;
mod repository;
mod schema;

pub use repository::{MechanicPgPool, PostgresMechanicDirectory};
