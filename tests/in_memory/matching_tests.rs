//! In-memory integration tests for proximity search and submission routing.

use super::helpers::{Marketplace, marketplace};
use crate::test_helpers::register_mechanic;
use roadside::{
    identity::{Actor, UserId},
    mechanic::domain::MechanicType,
    notification::ports::NotificationInbox,
    service_request::services::{SubmissionOutcome, SubmitServiceRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn candidates_are_ranked_then_one_is_chosen(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let far = register_mechanic(
        &*marketplace.directory,
        "Outer Ring Garage",
        28.76,
        77.10,
        &[MechanicType::Automotive],
    )
    .await?;
    let near = register_mechanic(
        &*marketplace.directory,
        "Corner Garage",
        28.71,
        77.10,
        &[MechanicType::Automotive, MechanicType::TwoWheeler],
    )
    .await?;
    register_mechanic(
        &*marketplace.directory,
        "Truck Bay",
        28.70,
        77.10,
        &[MechanicType::HeavyVehicle],
    )
    .await?;

    let form = SubmitServiceRequest::new("Brakes squeal", "Janpath", "automotive")
        .with_coordinates(28.70, 77.10);
    let outcome = marketplace
        .intake
        .submit(&marketplace.customer, form.clone())
        .await?;
    let SubmissionOutcome::Candidates(candidates) = outcome else {
        return Err(eyre::eyre!("expected candidates"));
    };
    let ranked: Vec<_> = candidates
        .iter()
        .map(|candidate| candidate.profile().mechanic_id())
        .collect();
    eyre::ensure!(ranked == vec![near, far], "unexpected ranking {ranked:?}");

    let chosen = marketplace
        .intake
        .submit(&marketplace.customer, form.with_target_mechanic(near))
        .await?;
    let SubmissionOutcome::Created(request) = chosen else {
        return Err(eyre::eyre!("expected a created request"));
    };
    eyre::ensure!(request.assignee() == Some(near), "request not addressed");

    let inbox = marketplace.inbox.list_for_recipient(near, 10).await?;
    eyre::ensure!(inbox.len() == 1, "expected one notification for the mechanic");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nobody_nearby_yields_an_empty_list(marketplace: Marketplace) -> Result<(), eyre::Report> {
    register_mechanic(
        &*marketplace.directory,
        "Hill Station Motors",
        30.32,
        78.03,
        &[MechanicType::Automotive],
    )
    .await?;

    let outcome = marketplace
        .intake
        .submit(
            &marketplace.customer,
            SubmitServiceRequest::new("Overheating", "Rajpath", "automotive")
                .with_coordinates(28.61, 77.21),
        )
        .await?;

    eyre::ensure!(
        matches!(outcome, SubmissionOutcome::Candidates(ref found) if found.is_empty()),
        "expected no candidates, got {outcome:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admins_cannot_submit_requests(marketplace: Marketplace) {
    let admin = Actor::admin(UserId::new());

    let result = marketplace
        .intake
        .submit(
            &admin,
            SubmitServiceRequest::new("Noise", "Janpath", "automotive")
                .with_coordinates(28.61, 77.21),
        )
        .await;

    assert!(result.is_err());
}
