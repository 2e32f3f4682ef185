//! In-memory integration tests for ratings and profile statistics.

use super::helpers::{Marketplace, marketplace};
use crate::test_helpers::register_mechanic;
use roadside::{
    identity::{Actor, UserId},
    mechanic::domain::MechanicType,
    rating::{domain::ReviewSource, services::SubmitRating},
    service_request::{
        domain::{IssueDescription, RequestDraft, RequestLocation, TransitionAction},
        services::SubmitServiceRequest,
    },
};
use rstest::rstest;

async fn completed_job(
    marketplace: &Marketplace,
    mechanic: UserId,
) -> Result<roadside::service_request::domain::ServiceRequestId, eyre::Report> {
    let draft = RequestDraft::new(
        IssueDescription::new("Puncture")?,
        RequestLocation::new("Saket", None),
        MechanicType::Automotive,
    );
    let request = marketplace
        .lifecycle
        .create_direct(&marketplace.customer, mechanic, draft)
        .await?;
    let actor = Actor::mechanic(mechanic);
    for action in [TransitionAction::Accept, TransitionAction::Complete] {
        marketplace
            .lifecycle
            .transition(request.id(), &actor, action)
            .await?;
    }
    Ok(request.id())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ratings_feed_the_matcher_and_profile(marketplace: Marketplace) -> Result<(), eyre::Report> {
    let mechanic = register_mechanic(
        &*marketplace.directory,
        "Saket Auto Care",
        28.71,
        77.10,
        &[MechanicType::Automotive],
    )
    .await?;
    for stars in [5, 4] {
        let job = completed_job(&marketplace, mechanic).await?;
        marketplace
            .ratings
            .submit_rating(&marketplace.customer, SubmitRating::new(job, stars))
            .await?;
    }
    let feedback_job = completed_job(&marketplace, mechanic).await?;
    marketplace
        .ratings
        .submit_feedback(
            &marketplace.customer,
            feedback_job,
            1,
            Some("Late".to_owned()),
        )
        .await?;

    let summary = marketplace.ratings.summary(mechanic).await?;
    eyre::ensure!(summary.review_count() == 2, "feedback must not be counted");
    eyre::ensure!(
        (summary.display_average() - 4.5).abs() < 1e-9,
        "unexpected average {}",
        summary.average()
    );

    let outcome = marketplace
        .intake
        .submit(
            &marketplace.customer,
            SubmitServiceRequest::new("Dent", "Saket", "automotive").with_coordinates(28.70, 77.10),
        )
        .await?;
    let roadside::service_request::services::SubmissionOutcome::Candidates(candidates) = outcome
    else {
        return Err(eyre::eyre!("expected candidates"));
    };
    let candidate = candidates
        .first()
        .ok_or_else(|| eyre::eyre!("expected one candidate"))?;
    eyre::ensure!(candidate.review_count() == 2, "candidate missing review count");

    let feed = marketplace.ratings.review_feed(mechanic).await?;
    let sources: Vec<ReviewSource> = feed.iter().map(|review| review.source).collect();
    eyre::ensure!(
        sources.iter().filter(|s| **s == ReviewSource::Feedback).count() == 1,
        "feed should hold the feedback entry"
    );
    eyre::ensure!(feed.len() == 3, "feed should hold every review");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revising_a_rating_replaces_it(marketplace: Marketplace) -> Result<(), eyre::Report> {
    let mechanic = UserId::new();
    let job = completed_job(&marketplace, mechanic).await?;

    marketplace
        .ratings
        .submit_rating(&marketplace.customer, SubmitRating::new(job, 1))
        .await?;
    marketplace
        .ratings
        .submit_rating(
            &marketplace.customer,
            SubmitRating::new(job, 5).with_feedback("Sorted it in the end"),
        )
        .await?;

    let breakdown = marketplace.ratings.rating_breakdown(mechanic).await?;
    let rows: Vec<(u8, u32)> = breakdown.descending().collect();
    eyre::ensure!(
        rows == vec![(5, 1), (4, 0), (3, 0), (2, 0), (1, 0)],
        "unexpected breakdown {rows:?}"
    );
    let stored = marketplace.lifecycle.find(job).await?;
    eyre::ensure!(
        stored.feedback() == Some("Sorted it in the end"),
        "request should carry the latest feedback"
    );
    Ok(())
}
