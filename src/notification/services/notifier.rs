//! Best-effort event delivery.

use crate::identity::UserId;
use crate::notification::{domain::LifecycleEvent, ports::NotificationSink};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Renders lifecycle events and delivers them to a sink.
///
/// Delivery failures are logged at `warn` and swallowed: the triggering
/// state change has already committed.
pub struct Notifier<N, C>
where
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    sink: Arc<N>,
    clock: Arc<C>,
}

impl<N, C> Notifier<N, C>
where
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a notifier over `sink`.
    #[must_use]
    pub const fn new(sink: Arc<N>, clock: Arc<C>) -> Self {
        Self { sink, clock }
    }

    /// Delivers `event` to `recipient`.
    pub async fn notify(&self, recipient: UserId, sender: Option<UserId>, event: LifecycleEvent) {
        let notification = event.into_notification(recipient, sender, &*self.clock);
        match self.sink.deliver(&notification).await {
            Ok(()) => {
                debug!(
                    request_id = %event.request_id(),
                    %recipient,
                    "notification delivered"
                );
            }
            Err(err) => {
                warn!(
                    request_id = %event.request_id(),
                    %recipient,
                    error = %err,
                    "notification delivery failed"
                );
            }
        }
    }
}

impl<N, C> Clone for Notifier<N, C>
where
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            clock: Arc::clone(&self.clock),
        }
    }
}
