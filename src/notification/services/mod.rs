//! Notification delivery helpers used by lifecycle services.

mod notifier;

pub use notifier::Notifier;
