//! Domain model for inbox notifications.

mod event;
mod ids;
mod notification;

pub use event::LifecycleEvent;
pub use ids::NotificationId;
pub use notification::{Notification, PersistedNotificationData};
