//! Behaviour tests for the service request lifecycle.

#[path = "service_request_lifecycle_steps/mod.rs"]
mod service_request_lifecycle_steps_defs;
mod test_helpers;

use rstest_bdd_macros::scenario;
use service_request_lifecycle_steps_defs::world::{LifecycleWorld, world};

#[scenario(
    path = "tests/features/service_request_lifecycle.feature",
    name = "Mechanic accepts a pending request"
)]
#[tokio::test(flavor = "multi_thread")]
async fn mechanic_accepts_pending_request(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/service_request_lifecycle.feature",
    name = "Accepting twice is rejected"
)]
#[tokio::test(flavor = "multi_thread")]
async fn accepting_twice_is_rejected(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/service_request_lifecycle.feature",
    name = "Unanswered request expires once"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unanswered_request_expires_once(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/service_request_lifecycle.feature",
    name = "Request younger than the threshold survives the sweep"
)]
#[tokio::test(flavor = "multi_thread")]
async fn young_request_survives_sweep(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/service_request_lifecycle.feature",
    name = "Expired request is re-raised and claimed by another mechanic"
)]
#[tokio::test(flavor = "multi_thread")]
async fn expired_request_is_re_raised_and_claimed(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/service_request_lifecycle.feature",
    name = "Customer rates a completed job"
)]
#[tokio::test(flavor = "multi_thread")]
async fn customer_rates_completed_job(world: LifecycleWorld) {
    let _ = world;
}
