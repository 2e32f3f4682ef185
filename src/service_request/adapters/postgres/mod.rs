//! `PostgreSQL` adapters for requests and chat.

mod blocking;
mod chat;
mod models;
mod repository;
mod schema;

pub use chat::PostgresChatRepository;
pub use blocking::ServiceRequestPgPool;
pub use repository::PostgresServiceRequestRepository;
