//! Then steps for service request lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use roadside::{
    error::ErrorCategory, notification::ports::NotificationInbox,
    service_request::domain::RequestStatus,
};
use rstest_bdd_macros::then;

#[then(r#"the request status is "{status}""#)]
fn request_status_is(world: &LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = RequestStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let stored = run_async(world.lifecycle.find(world.request()?.id()))?;
    eyre::ensure!(
        stored.status() == expected,
        "expected status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then(r#"the re-raised request status is "{status}""#)]
fn re_raised_status_is(world: &LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = RequestStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let raised = world
        .re_raised
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing re-raised request"))?;
    eyre::ensure!(
        raised.status() == expected,
        "expected status {expected}, found {}",
        raised.status()
    );
    Ok(())
}

#[then("the action fails with a state error")]
fn action_fails_with_state_error(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing action result"))?;
    match result {
        Err(err) if err.category() == ErrorCategory::State => Ok(()),
        other => Err(eyre::eyre!("expected a state failure, got {other:?}")),
    }
}

#[then("the latest customer notification links to the chat")]
fn latest_notification_links_to_chat(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let customer = world.customer()?;
    let request_id = world.request()?.id();
    let inbox = run_async(world.inbox.list_for_recipient(customer.id(), 1))?;
    let latest = inbox
        .first()
        .ok_or_else(|| eyre::eyre!("customer has no notifications"))?;
    let expected = format!("/requests/{request_id}/chat");
    eyre::ensure!(
        latest.link() == Some(expected.as_str()),
        "expected link {expected}, found {:?}",
        latest.link()
    );
    Ok(())
}

#[then("the customer has {count:usize} expiry notification in the inbox")]
fn expiry_notification_count(world: &LifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    let customer = world.customer()?;
    let inbox = run_async(world.inbox.list_for_recipient(customer.id(), 100))?;
    let expiries = inbox
        .iter()
        .filter(|notification| notification.message().contains("expired"))
        .count();
    eyre::ensure!(
        expiries == count,
        "expected {count} expiry notifications, found {expiries}"
    );
    Ok(())
}

#[then("the re-raised request is assigned to the other mechanic")]
fn re_raised_assigned_to_other(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let raised = world
        .re_raised
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing re-raised request"))?;
    let claimant = world
        .other_mechanic
        .ok_or_else(|| eyre::eyre!("missing claiming mechanic"))?;
    eyre::ensure!(
        raised.assignee() == Some(claimant.id()),
        "re-raised request is not assigned to the claimant"
    );
    eyre::ensure!(
        raised.id() != world.request()?.id(),
        "re-raise must create a new request"
    );
    Ok(())
}

#[then("the mechanic has an average rating of {average:f64} from {reviews:u32} review")]
fn mechanic_average(
    world: &LifecycleWorld,
    average: f64,
    reviews: u32,
) -> Result<(), eyre::Report> {
    let mechanic = world.mechanic()?;
    let summary = run_async(world.ratings.summary(mechanic.id()))?;
    eyre::ensure!(
        (summary.average() - average).abs() < 1e-9,
        "expected average {average}, found {}",
        summary.average()
    );
    eyre::ensure!(
        summary.review_count() == reviews,
        "expected {reviews} reviews, found {}",
        summary.review_count()
    );
    Ok(())
}
