//! Wiring for in-memory integration tests.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use roadside::{
    config::EngineConfig,
    identity::{Actor, UserId},
    mechanic::{adapters::memory::InMemoryMechanicDirectory, services::ProximityMatcher},
    notification::adapters::memory::InMemoryNotificationInbox,
    rating::{adapters::memory::InMemoryRatingRepository, services::RatingService},
    service_request::{
        adapters::memory::{InMemoryChatRepository, InMemoryServiceRequestRepository},
        services::{ChatService, RequestIntakeService, RequestLifecycleService},
    },
};
use rstest::fixture;

/// Lifecycle service over in-memory adapters.
pub type Lifecycle =
    RequestLifecycleService<InMemoryServiceRequestRepository, InMemoryNotificationInbox, ManualClock>;

/// Every service of the engine sharing one set of in-memory adapters.
pub struct Marketplace {
    pub clock: Arc<ManualClock>,
    pub directory: Arc<InMemoryMechanicDirectory>,
    pub requests: Arc<InMemoryServiceRequestRepository>,
    pub inbox: Arc<InMemoryNotificationInbox>,
    pub lifecycle: Lifecycle,
    pub intake: RequestIntakeService<
        InMemoryServiceRequestRepository,
        InMemoryNotificationInbox,
        ManualClock,
        InMemoryMechanicDirectory,
        InMemoryRatingRepository,
    >,
    pub ratings: RatingService<
        InMemoryRatingRepository,
        InMemoryServiceRequestRepository,
        InMemoryNotificationInbox,
        ManualClock,
    >,
    pub chat: ChatService<InMemoryServiceRequestRepository, InMemoryChatRepository, ManualClock>,
    pub customer: Actor,
}

impl Marketplace {
    /// Wires every service with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let clock = Arc::new(ManualClock::new());
        let directory = Arc::new(InMemoryMechanicDirectory::new());
        let requests = Arc::new(InMemoryServiceRequestRepository::new());
        let rating_store = Arc::new(InMemoryRatingRepository::new());
        let inbox = Arc::new(InMemoryNotificationInbox::new());

        let lifecycle = RequestLifecycleService::new(
            Arc::clone(&requests),
            Arc::clone(&inbox),
            Arc::clone(&clock),
            &config,
        );
        let matcher =
            ProximityMatcher::new(Arc::clone(&directory), Arc::clone(&rating_store), &config);
        let intake = RequestIntakeService::new(lifecycle.clone(), matcher, Arc::clone(&directory));
        let ratings = RatingService::new(
            rating_store,
            Arc::clone(&requests),
            Arc::clone(&inbox),
            Arc::clone(&clock),
        );
        let chat = ChatService::new(
            Arc::clone(&requests),
            Arc::new(InMemoryChatRepository::new()),
            Arc::clone(&clock),
        );

        Self {
            clock,
            directory,
            requests,
            inbox,
            lifecycle,
            intake,
            ratings,
            chat,
            customer: Actor::customer(UserId::new()),
        }
    }
}

impl Default for Marketplace {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides a freshly wired marketplace for each test.
#[fixture]
pub fn marketplace() -> Marketplace {
    Marketplace::new()
}
