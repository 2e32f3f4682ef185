//! Notification inbox fed by request lifecycle events.
//!
//! Lifecycle services render a [`domain::LifecycleEvent`] into a
//! [`domain::Notification`] and hand it to a [`ports::NotificationSink`].
//! Delivery is best effort: a failed write is logged and never undoes the
//! state change that triggered it.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
