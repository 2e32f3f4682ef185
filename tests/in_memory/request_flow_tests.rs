//! In-memory integration tests for the request lifecycle.

use chrono::TimeDelta;

use super::helpers::{Marketplace, marketplace};
use crate::test_helpers::register_mechanic;
use roadside::{
    error::ErrorCategory,
    identity::Actor,
    mechanic::domain::MechanicType,
    notification::ports::NotificationInbox,
    service_request::{
        domain::{Dispatch, RequestStatus, TransitionAction},
        services::{SubmissionOutcome, SubmitServiceRequest},
    },
};
use rstest::rstest;

async fn direct_request(
    marketplace: &Marketplace,
) -> Result<(Actor, roadside::service_request::domain::ServiceRequest), eyre::Report> {
    let mechanic_id = register_mechanic(
        &*marketplace.directory,
        "Corner Garage",
        28.71,
        77.10,
        &[MechanicType::TwoWheeler],
    )
    .await?;
    let outcome = marketplace
        .intake
        .submit(
            &marketplace.customer,
            SubmitServiceRequest::new("Chain snapped", "Lajpat Nagar", "two_wheeler")
                .with_coordinates(28.70, 77.10)
                .with_target_mechanic(mechanic_id),
        )
        .await?;
    let SubmissionOutcome::Created(request) = outcome else {
        return Err(eyre::eyre!("expected a created request"));
    };
    Ok((Actor::mechanic(mechanic_id), request))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn request_runs_from_pending_to_completed(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let (mechanic, request) = direct_request(&marketplace).await?;

    for action in [
        TransitionAction::Accept,
        TransitionAction::Start,
        TransitionAction::Complete,
    ] {
        marketplace
            .lifecycle
            .transition(request.id(), &mechanic, action)
            .await?;
    }

    let stored = marketplace.lifecycle.find(request.id()).await?;
    eyre::ensure!(
        stored.status() == RequestStatus::Completed,
        "unexpected status {}",
        stored.status()
    );
    let inbox = marketplace
        .inbox
        .list_for_recipient(marketplace.customer.id(), 10)
        .await?;
    eyre::ensure!(inbox.len() == 3, "expected three customer notifications");
    let newest = inbox
        .first()
        .ok_or_else(|| eyre::eyre!("missing newest notification"))?;
    eyre::ensure!(
        newest.message().contains("completed"),
        "newest notification should report completion"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unanswered_request_expires_and_can_be_re_raised(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let (mechanic, request) = direct_request(&marketplace).await?;
    marketplace.clock.advance(TimeDelta::minutes(5));

    let listed = marketplace
        .lifecycle
        .requests_for_customer(&marketplace.customer)
        .await?;
    let expired = listed
        .iter()
        .find(|candidate| candidate.id() == request.id())
        .ok_or_else(|| eyre::eyre!("request missing from listing"))?;
    eyre::ensure!(expired.status() == RequestStatus::Expired, "request not expired");

    let late = marketplace
        .lifecycle
        .transition(request.id(), &mechanic, TransitionAction::Accept)
        .await;
    eyre::ensure!(
        late.as_ref()
            .is_err_and(|err| err.category() == ErrorCategory::State),
        "late accept should be a state failure"
    );

    let raised = marketplace
        .lifecycle
        .re_raise(request.id(), &marketplace.customer)
        .await?;
    eyre::ensure!(raised.dispatch() == Dispatch::Broadcast, "expected broadcast");
    eyre::ensure!(raised.assignee().is_none(), "broadcast must be unassigned");
    eyre::ensure!(
        raised.draft() == request.draft(),
        "re-raised request must copy the draft"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mechanic_dashboard_counts_by_status(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let (mechanic, first) = direct_request(&marketplace).await?;
    marketplace
        .lifecycle
        .transition(first.id(), &mechanic, TransitionAction::Reject)
        .await?;

    let counts = marketplace
        .lifecycle
        .mechanic_status_counts(&mechanic)
        .await?;

    eyre::ensure!(counts.rejected == 1, "expected one rejected request");
    eyre::ensure!(counts.pending == 0, "expected no pending requests");
    Ok(())
}
