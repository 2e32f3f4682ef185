//! In-memory notification inbox.

mod inbox;

pub use inbox::InMemoryNotificationInbox;
