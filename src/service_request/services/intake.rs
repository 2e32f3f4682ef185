//! Entry point for customer submissions.

use super::{LifecycleError, RequestLifecycleService};
use crate::error::ErrorCategory;
use crate::identity::{Actor, UserId};
use crate::mechanic::{
    domain::{Coordinates, GeoDomainError, MechanicType, NearbyMechanic, ParseMechanicTypeError},
    ports::{MechanicDirectory, MechanicDirectoryError},
    services::{MatcherError, ProximityMatcher},
};
use crate::notification::ports::NotificationSink;
use crate::rating::ports::RatingRepository;
use crate::service_request::{
    domain::{
        AccessPolicy, AuthorizationError, IssueDescription, RequestAction, RequestDraft,
        RequestLocation, ServiceRequest, ServiceRequestDomainError,
    },
    ports::ServiceRequestRepository,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Raw submission from the request form.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitServiceRequest {
    issue: String,
    location: String,
    mechanic_type: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    target_mechanic: Option<UserId>,
}

impl SubmitServiceRequest {
    /// Creates a submission with the required text fields.
    #[must_use]
    pub fn new(
        issue: impl Into<String>,
        location: impl Into<String>,
        mechanic_type: impl Into<String>,
    ) -> Self {
        Self {
            issue: issue.into(),
            location: location.into(),
            mechanic_type: mechanic_type.into(),
            latitude: None,
            longitude: None,
            target_mechanic: None,
        }
    }

    /// Sets the customer's coordinates.
    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Sets the components individually, as posted by the form.
    #[must_use]
    pub const fn with_optional_coordinates(
        mut self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Addresses the request to a chosen mechanic.
    #[must_use]
    pub const fn with_target_mechanic(mut self, mechanic: UserId) -> Self {
        self.target_mechanic = Some(mechanic);
        self
    }
}

/// What a submission produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// A request was created for the chosen mechanic.
    Created(ServiceRequest),
    /// No mechanic was chosen; these candidates are nearby, nearest first.
    Candidates(Vec<NearbyMechanic>),
}

/// Service-level errors for request submission.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The access policy denied the submission.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// Request content failed validation.
    #[error(transparent)]
    Domain(#[from] ServiceRequestDomainError),
    /// The coordinates are invalid.
    #[error(transparent)]
    Geo(#[from] GeoDomainError),
    /// The service category is unknown.
    #[error(transparent)]
    MechanicType(#[from] ParseMechanicTypeError),
    /// Coordinates are required to route a request.
    #[error("latitude and longitude are required")]
    MissingCoordinates,
    /// The chosen mechanic is not registered.
    #[error("mechanic not found: {0}")]
    UnknownMechanic(UserId),
    /// Matching failed.
    #[error(transparent)]
    Matcher(#[from] MatcherError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] MechanicDirectoryError),
    /// Request creation failed.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl IntakeError {
    /// Returns the caller-facing failure category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Authorization(_) => ErrorCategory::Authorization,
            Self::Domain(err) => err.category(),
            Self::Geo(_) | Self::MechanicType(_) | Self::MissingCoordinates => {
                ErrorCategory::Validation
            }
            Self::UnknownMechanic(_) => ErrorCategory::NotFound,
            Self::Matcher(err) => err.category(),
            Self::Directory(_) => ErrorCategory::Infrastructure,
            Self::Lifecycle(err) => err.category(),
        }
    }
}

/// Result type for request submission.
pub type IntakeResult<T> = Result<T, IntakeError>;

/// Routes submissions either to the matcher or to direct creation.
pub struct RequestIntakeService<R, N, C, M, G>
where
    R: ServiceRequestRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
    M: MechanicDirectory,
    G: RatingRepository,
{
    lifecycle: RequestLifecycleService<R, N, C>,
    matcher: ProximityMatcher<M, G>,
    directory: Arc<M>,
}

impl<R, N, C, M, G> RequestIntakeService<R, N, C, M, G>
where
    R: ServiceRequestRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
    M: MechanicDirectory,
    G: RatingRepository,
{
    /// Creates an intake service.
    #[must_use]
    pub const fn new(
        lifecycle: RequestLifecycleService<R, N, C>,
        matcher: ProximityMatcher<M, G>,
        directory: Arc<M>,
    ) -> Self {
        Self {
            lifecycle,
            matcher,
            directory,
        }
    }

    /// Validates a submission, then creates a direct request when a mechanic
    /// was chosen or returns nearby candidates when not.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Authorization`] unless the actor is a customer,
    /// a validation failure for blank issue text, an unknown service
    /// category or missing or out-of-range coordinates, and
    /// [`IntakeError::UnknownMechanic`] when the chosen mechanic is not
    /// registered.
    pub async fn submit(
        &self,
        actor: &Actor,
        submission: SubmitServiceRequest,
    ) -> IntakeResult<SubmissionOutcome> {
        AccessPolicy::authorize(RequestAction::Create, actor, None)?;

        let issue = IssueDescription::new(submission.issue)?;
        let mechanic_type = MechanicType::try_from(submission.mechanic_type.as_str())?;
        let origin = Coordinates::from_optional(submission.latitude, submission.longitude)?
            .ok_or(IntakeError::MissingCoordinates)?;

        let Some(mechanic) = submission.target_mechanic else {
            let candidates = self.matcher.find_near(origin, mechanic_type).await?;
            return Ok(SubmissionOutcome::Candidates(candidates));
        };

        if self.directory.find(mechanic).await?.is_none() {
            return Err(IntakeError::UnknownMechanic(mechanic));
        }
        let draft = RequestDraft::new(
            issue,
            RequestLocation::new(submission.location, Some(origin)),
            mechanic_type,
        );
        let request = self.lifecycle.create_direct(actor, mechanic, draft).await?;
        Ok(SubmissionOutcome::Created(request))
    }
}
