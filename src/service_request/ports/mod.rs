//! Port contracts for request and chat persistence.

pub mod chat;
pub mod repository;

pub use chat::{ChatRepository, ChatRepositoryError, ChatRepositoryResult};
pub use repository::{
    ServiceRequestRepository, ServiceRequestRepositoryError, ServiceRequestRepositoryResult,
};
