//! In-memory integration tests for chat across the lifecycle.

use super::helpers::{Marketplace, marketplace};
use roadside::{
    error::ErrorCategory,
    identity::{Actor, UserId},
    mechanic::domain::MechanicType,
    service_request::domain::{
        IssueDescription, RequestDraft, RequestLocation, TransitionAction,
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chat_opens_on_acceptance_and_closes_on_completion(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let mechanic = Actor::mechanic(UserId::new());
    let draft = RequestDraft::new(
        IssueDescription::new("Clutch slipping")?,
        RequestLocation::new("Dwarka", None),
        MechanicType::Automotive,
    );
    let request = marketplace
        .lifecycle
        .create_direct(&marketplace.customer, mechanic.id(), draft)
        .await?;

    let before = marketplace
        .chat
        .send_message(request.id(), &marketplace.customer, "Hello?")
        .await;
    eyre::ensure!(
        before
            .as_ref()
            .is_err_and(|err| err.category() == ErrorCategory::State),
        "chat must be closed while pending"
    );

    marketplace
        .lifecycle
        .transition(request.id(), &mechanic, TransitionAction::Accept)
        .await?;
    marketplace
        .chat
        .send_message(request.id(), &marketplace.customer, "Hello?")
        .await?;
    marketplace
        .chat
        .send_message(request.id(), &mechanic, "On my way")
        .await?;

    marketplace
        .lifecycle
        .transition(request.id(), &mechanic, TransitionAction::Complete)
        .await?;
    let after = marketplace
        .chat
        .send_message(request.id(), &mechanic, "Thanks")
        .await;
    eyre::ensure!(after.is_err(), "chat must close after completion");

    let history = marketplace
        .chat
        .history(request.id(), &marketplace.customer)
        .await?;
    eyre::ensure!(history.len() == 2, "expected two messages");
    Ok(())
}
