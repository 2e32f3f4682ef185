//! Given steps for service request lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use crate::test_helpers::register_mechanic;
use chrono::TimeDelta;
use eyre::WrapErr;
use roadside::{
    identity::{Actor, UserId},
    mechanic::domain::{Coordinates, MechanicType},
    service_request::domain::{
        IssueDescription, RequestDraft, RequestLocation, TransitionAction,
    },
};
use rstest_bdd_macros::given;

#[given(r#"a customer and a registered "{mechanic_type}" mechanic"#)]
fn customer_and_mechanic(
    world: &mut LifecycleWorld,
    mechanic_type: String,
) -> Result<(), eyre::Report> {
    let offered = MechanicType::try_from(mechanic_type.as_str())?;
    let mechanic = run_async(register_mechanic(
        &*world.directory,
        "Corner Garage",
        28.71,
        77.10,
        &[offered],
    ))
    .wrap_err("register scenario mechanic")?;
    world.customer = Some(Actor::customer(UserId::new()));
    world.mechanic = Some(Actor::mechanic(mechanic));
    Ok(())
}

#[given("the customer has raised a request to the mechanic")]
fn customer_raised_request(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let customer = world.customer()?;
    let mechanic = world.mechanic()?;
    let draft = RequestDraft::new(
        IssueDescription::new("Engine stalls at idle")?,
        RequestLocation::new("Hauz Khas", Some(Coordinates::new(28.70, 77.10)?)),
        MechanicType::Automotive,
    );
    let created = run_async(world.lifecycle.create_direct(&customer, mechanic.id(), draft))
        .wrap_err("raise scenario request")?;
    world.request = Some(created);
    Ok(())
}

#[given("the mechanic has accepted the request")]
fn mechanic_has_accepted(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    apply(world, TransitionAction::Accept)
}

#[given("the mechanic has completed the request")]
fn mechanic_has_completed(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    apply(world, TransitionAction::Complete)
}

#[given("{minutes:i64} minutes pass")]
fn minutes_pass(world: &mut LifecycleWorld, minutes: i64) {
    world.clock.advance(TimeDelta::minutes(minutes));
}

#[given("the expiry sweep has run")]
fn expiry_sweep_has_run(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    run_async(world.lifecycle.sweep_expired()).wrap_err("run expiry sweep")?;
    Ok(())
}

fn apply(world: &mut LifecycleWorld, action: TransitionAction) -> Result<(), eyre::Report> {
    let mechanic = world.mechanic()?;
    let id = world.request()?.id();
    let updated = run_async(world.lifecycle.transition(id, &mechanic, action))
        .wrap_err_with(|| format!("{action} scenario request"))?;
    world.request = Some(updated);
    Ok(())
}
