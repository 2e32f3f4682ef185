//! In-memory adapters for requests and chat.

mod chat;
mod request;

pub use chat::InMemoryChatRepository;
pub use request::InMemoryServiceRequestRepository;
