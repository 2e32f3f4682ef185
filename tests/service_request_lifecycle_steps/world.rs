//! Shared world state for service request lifecycle BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use roadside::{
    config::EngineConfig,
    identity::Actor,
    mechanic::adapters::memory::InMemoryMechanicDirectory,
    notification::adapters::memory::InMemoryNotificationInbox,
    rating::{adapters::memory::InMemoryRatingRepository, services::RatingService},
    service_request::{
        adapters::memory::InMemoryServiceRequestRepository,
        domain::ServiceRequest,
        services::{LifecycleError, RequestLifecycleService},
    },
};
use rstest::fixture;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycle =
    RequestLifecycleService<InMemoryServiceRequestRepository, InMemoryNotificationInbox, ManualClock>;

/// Rating service type used by the BDD world.
pub type TestRatings = RatingService<
    InMemoryRatingRepository,
    InMemoryServiceRequestRepository,
    InMemoryNotificationInbox,
    ManualClock,
>;

/// Scenario world for lifecycle behaviour tests.
pub struct LifecycleWorld {
    pub clock: Arc<ManualClock>,
    pub directory: Arc<InMemoryMechanicDirectory>,
    pub inbox: Arc<InMemoryNotificationInbox>,
    pub lifecycle: TestLifecycle,
    pub ratings: TestRatings,
    pub customer: Option<Actor>,
    pub mechanic: Option<Actor>,
    pub other_mechanic: Option<Actor>,
    pub request: Option<ServiceRequest>,
    pub re_raised: Option<ServiceRequest>,
    pub last_result: Option<Result<ServiceRequest, LifecycleError>>,
}

impl LifecycleWorld {
    /// Creates a world over fresh in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new());
        let requests = Arc::new(InMemoryServiceRequestRepository::new());
        let inbox = Arc::new(InMemoryNotificationInbox::new());
        let lifecycle = RequestLifecycleService::new(
            Arc::clone(&requests),
            Arc::clone(&inbox),
            Arc::clone(&clock),
            &EngineConfig::default(),
        );
        let ratings = RatingService::new(
            Arc::new(InMemoryRatingRepository::new()),
            requests,
            Arc::clone(&inbox),
            Arc::clone(&clock),
        );

        Self {
            clock,
            directory: Arc::new(InMemoryMechanicDirectory::new()),
            inbox,
            lifecycle,
            ratings,
            customer: None,
            mechanic: None,
            other_mechanic: None,
            request: None,
            re_raised: None,
            last_result: None,
        }
    }

    /// Returns the scenario customer.
    ///
    /// # Errors
    ///
    /// Returns an error when no customer was set up.
    pub fn customer(&self) -> Result<Actor, eyre::Report> {
        self.customer
            .ok_or_else(|| eyre::eyre!("missing customer in scenario world"))
    }

    /// Returns the scenario mechanic.
    ///
    /// # Errors
    ///
    /// Returns an error when no mechanic was set up.
    pub fn mechanic(&self) -> Result<Actor, eyre::Report> {
        self.mechanic
            .ok_or_else(|| eyre::eyre!("missing mechanic in scenario world"))
    }

    /// Returns the request raised in the background.
    ///
    /// # Errors
    ///
    /// Returns an error when no request was raised.
    pub fn request(&self) -> Result<&ServiceRequest, eyre::Report> {
        self.request
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing request in scenario world"))
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
