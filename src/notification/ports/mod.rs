//! Port contracts for notification delivery and inbox reads.

pub mod inbox;
pub mod sink;

pub use inbox::NotificationInbox;
pub use sink::{NotificationError, NotificationResult, NotificationSink};

#[cfg(test)]
pub use sink::MockNotificationSink;
