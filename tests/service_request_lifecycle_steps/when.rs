//! When steps for service request lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use eyre::WrapErr;
use roadside::{
    identity::{Actor, UserId},
    rating::services::SubmitRating,
    service_request::domain::TransitionAction,
};
use rstest_bdd_macros::when;

#[when("the mechanic accepts the request")]
fn mechanic_accepts(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let mechanic = world.mechanic()?;
    let id = world.request()?.id();
    let result = run_async(
        world
            .lifecycle
            .transition(id, &mechanic, TransitionAction::Accept),
    );
    if let Ok(ref updated) = result {
        world.request = Some(updated.clone());
    }
    world.last_result = Some(result);
    Ok(())
}

#[when("the expiry sweep runs twice")]
fn expiry_sweep_runs_twice(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    for _ in 0..2 {
        run_async(world.lifecycle.sweep_expired()).wrap_err("run expiry sweep")?;
    }
    Ok(())
}

#[when("the customer re-raises the request")]
fn customer_re_raises(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let customer = world.customer()?;
    let id = world.request()?.id();
    let raised = run_async(world.lifecycle.re_raise(id, &customer))
        .wrap_err("re-raise expired request")?;
    world.re_raised = Some(raised);
    Ok(())
}

#[when("another mechanic accepts the re-raised request")]
fn another_mechanic_accepts(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let claimant = Actor::mechanic(UserId::new());
    let id = world
        .re_raised
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing re-raised request"))?
        .id();
    let claimed = run_async(
        world
            .lifecycle
            .transition(id, &claimant, TransitionAction::Accept),
    )
    .wrap_err("claim re-raised request")?;
    world.other_mechanic = Some(claimant);
    world.re_raised = Some(claimed);
    Ok(())
}

#[when("the customer rates the mechanic {stars:i64} stars")]
fn customer_rates(world: &mut LifecycleWorld, stars: i64) -> Result<(), eyre::Report> {
    let customer = world.customer()?;
    let id = world.request()?.id();
    run_async(
        world
            .ratings
            .submit_rating(&customer, SubmitRating::new(id, stars)),
    )
    .wrap_err("rate scenario mechanic")?;
    Ok(())
}
