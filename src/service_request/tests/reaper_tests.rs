//! Expiry sweep tests.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::identity::UserId;
use crate::mechanic::domain::MechanicType;
use crate::notification::ports::{MockNotificationSink, NotificationError};
use crate::service_request::{
    adapters::memory::InMemoryServiceRequestRepository,
    domain::{RequestStatus, ServiceRequest, TransitionAction},
    ports::ServiceRequestRepository,
    services::ExpiryReaper,
};
use crate::test_support::ManualClock;
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;

use super::fixtures::{LifecycleHarness, draft, lifecycle};

async fn pending(harness: &LifecycleHarness) -> ServiceRequest {
    harness
        .service
        .create_direct(
            &harness.customer,
            harness.mechanic.id(),
            draft(MechanicType::HeavyVehicle),
        )
        .await
        .expect("create succeeds")
}

fn expiry_notices(harness: &LifecycleHarness) -> usize {
    harness
        .inbox
        .delivered()
        .expect("inbox readable")
        .iter()
        .filter(|n| n.link().is_none())
        .count()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn young_requests_survive_the_sweep(lifecycle: LifecycleHarness) {
    let request = pending(&lifecycle).await;
    lifecycle.clock.advance(TimeDelta::seconds(299));

    let expired = lifecycle.service.sweep_expired().await.expect("sweep");

    assert_eq!(expired, 0);
    let stored = lifecycle.service.find(request.id()).await.expect("exists");
    assert_eq!(stored.status(), RequestStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_is_idempotent_and_notifies_once(lifecycle: LifecycleHarness) {
    let first = pending(&lifecycle).await;
    let second = pending(&lifecycle).await;
    lifecycle.clock.advance(TimeDelta::minutes(5));

    assert_eq!(lifecycle.service.sweep_expired().await.expect("sweep"), 2);
    assert_eq!(lifecycle.service.sweep_expired().await.expect("sweep"), 0);

    for id in [first.id(), second.id()] {
        let stored = lifecycle.service.find(id).await.expect("exists");
        assert_eq!(stored.status(), RequestStatus::Expired);
    }
    assert_eq!(expiry_notices(&lifecycle), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn answered_requests_are_not_expired(lifecycle: LifecycleHarness) {
    let request = pending(&lifecycle).await;
    lifecycle
        .service
        .transition(request.id(), &lifecycle.mechanic, TransitionAction::Accept)
        .await
        .expect("accept succeeds");
    lifecycle.clock.advance(TimeDelta::hours(1));

    assert_eq!(lifecycle.service.sweep_expired().await.expect("sweep"), 0);
    assert_eq!(expiry_notices(&lifecycle), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_sweeps_expire_each_request_once(lifecycle: LifecycleHarness) {
    for _ in 0..5 {
        pending(&lifecycle).await;
    }
    lifecycle.clock.advance(TimeDelta::minutes(6));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = lifecycle.service.clone();
            tokio::spawn(async move { service.sweep_expired().await })
        })
        .collect();
    let mut total = 0_usize;
    for handle in handles {
        total = total.saturating_add(handle.await.expect("task joins").expect("sweep"));
    }

    assert_eq!(total, 5);
    assert_eq!(expiry_notices(&lifecycle), 5);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delivery_failures_do_not_stop_the_sweep() {
    let repository = Arc::new(InMemoryServiceRequestRepository::new());
    let clock = Arc::new(ManualClock::fixed());
    let customer = UserId::new();
    for _ in 0..3 {
        let request = ServiceRequest::new_direct(
            customer,
            UserId::new(),
            draft(MechanicType::Automotive),
            &*clock,
        );
        repository.store(&request).await.expect("store succeeds");
    }
    let mut sink = MockNotificationSink::new();
    sink.expect_deliver().times(3).returning(|_| {
        Err(NotificationError::persistence(std::io::Error::other(
            "inbox offline",
        )))
    });
    let reaper = ExpiryReaper::new(
        Arc::clone(&repository),
        Arc::new(sink),
        Arc::clone(&clock),
        &EngineConfig::default(),
    );
    clock.advance(TimeDelta::minutes(5));

    let expired = reaper.sweep_expired().await.expect("sweep");

    assert_eq!(expired, 3);
    let remaining = repository
        .list_stale_pending(clock.utc())
        .await
        .expect("query succeeds");
    assert!(remaining.is_empty());
}
