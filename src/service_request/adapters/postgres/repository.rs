//! `PostgreSQL` service request repository.

use super::{
    blocking::{ServiceRequestPgPool, run_blocking_with},
    models::ServiceRequestRow,
    schema::service_requests,
};
use crate::identity::UserId;
use crate::mechanic::domain::{Coordinates, MechanicType};
use crate::rating::domain::StarRating;
use crate::service_request::{
    domain::{
        Dispatch, IssueDescription, PersistedServiceRequestData, RequestDraft, RequestLocation,
        RequestStatus, ServiceRequest, ServiceRequestId,
    },
    ports::{
        ServiceRequestRepository, ServiceRequestRepositoryError, ServiceRequestRepositoryResult,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed service request repository.
#[derive(Debug, Clone)]
pub struct PostgresServiceRequestRepository {
    pool: ServiceRequestPgPool,
}

impl PostgresServiceRequestRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ServiceRequestPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ServiceRequestRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ServiceRequestRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_blocking_with(
            &self.pool,
            move |connection| f(connection),
            ServiceRequestRepositoryError::persistence,
            ServiceRequestRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl ServiceRequestRepository for PostgresServiceRequestRepository {
    async fn store(&self, request: &ServiceRequest) -> ServiceRequestRepositoryResult<()> {
        let row = to_row(request);
        let request_id = request.id();
        self.run_blocking(move |connection| {
            diesel::insert_into(service_requests::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ServiceRequestRepositoryError::DuplicateRequest(request_id)
                    }
                    _ => ServiceRequestRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: ServiceRequestId,
    ) -> ServiceRequestRepositoryResult<Option<ServiceRequest>> {
        self.run_blocking(move |connection| {
            let row = service_requests::table
                .filter(service_requests::id.eq(id.into_inner()))
                .select(ServiceRequestRow::as_select())
                .first::<ServiceRequestRow>(connection)
                .optional()
                .map_err(ServiceRequestRepositoryError::persistence)?;
            row.map(row_to_request).transpose()
        })
        .await
    }

    async fn update_if_status(
        &self,
        request: &ServiceRequest,
        expected: RequestStatus,
    ) -> ServiceRequestRepositoryResult<()> {
        let id = request.id();
        let status = request.status().as_str().to_owned();
        let assignee = request.assignee().map(UserId::into_inner);
        let updated_at = request.updated_at();
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                service_requests::table
                    .filter(service_requests::id.eq(id.into_inner()))
                    .filter(service_requests::status.eq(expected.as_str())),
            )
            .set((
                service_requests::status.eq(status),
                service_requests::assignee_id.eq(assignee),
                service_requests::updated_at.eq(updated_at),
            ))
            .execute(connection)
            .map_err(ServiceRequestRepositoryError::persistence)?;
            if updated > 0 {
                return Ok(());
            }
            Err(conflict_or_missing(connection, id, expected))
        })
        .await
    }

    async fn update_rating(&self, request: &ServiceRequest) -> ServiceRequestRepositoryResult<()> {
        let id = request.id();
        let rating = request.rating().map(|stars| i16::from(stars.value()));
        let feedback = request.feedback().map(str::to_owned);
        let updated_at = request.updated_at();
        self.run_blocking(move |connection| {
            let updated = diesel::update(service_requests::table.find(id.into_inner()))
                .set((
                    service_requests::rating.eq(rating),
                    service_requests::feedback.eq(feedback),
                    service_requests::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(ServiceRequestRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ServiceRequestRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list_for_requester(
        &self,
        requester: UserId,
    ) -> ServiceRequestRepositoryResult<Vec<ServiceRequest>> {
        self.run_blocking(move |connection| {
            let rows = service_requests::table
                .filter(service_requests::requester_id.eq(requester.into_inner()))
                .order(service_requests::created_at.desc())
                .select(ServiceRequestRow::as_select())
                .load::<ServiceRequestRow>(connection)
                .map_err(ServiceRequestRepositoryError::persistence)?;
            rows.into_iter().map(row_to_request).collect()
        })
        .await
    }

    async fn list_for_assignee(
        &self,
        assignee: UserId,
        status: Option<RequestStatus>,
    ) -> ServiceRequestRepositoryResult<Vec<ServiceRequest>> {
        self.run_blocking(move |connection| {
            let mut query = service_requests::table
                .filter(service_requests::assignee_id.eq(assignee.into_inner()))
                .order(service_requests::created_at.desc())
                .select(ServiceRequestRow::as_select())
                .into_boxed();
            if let Some(wanted) = status {
                query = query.filter(service_requests::status.eq(wanted.as_str()));
            }
            let rows = query
                .load::<ServiceRequestRow>(connection)
                .map_err(ServiceRequestRepositoryError::persistence)?;
            rows.into_iter().map(row_to_request).collect()
        })
        .await
    }

    async fn list_stale_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> ServiceRequestRepositoryResult<Vec<ServiceRequest>> {
        self.run_blocking(move |connection| {
            let rows = service_requests::table
                .filter(service_requests::status.eq(RequestStatus::Pending.as_str()))
                .filter(service_requests::created_at.le(cutoff))
                .order(service_requests::created_at.asc())
                .select(ServiceRequestRow::as_select())
                .load::<ServiceRequestRow>(connection)
                .map_err(ServiceRequestRepositoryError::persistence)?;
            rows.into_iter().map(row_to_request).collect()
        })
        .await
    }
}

/// Explains why a compare-and-set touched no rows.
fn conflict_or_missing(
    connection: &mut PgConnection,
    id: ServiceRequestId,
    expected: RequestStatus,
) -> ServiceRequestRepositoryError {
    let current = service_requests::table
        .filter(service_requests::id.eq(id.into_inner()))
        .select(service_requests::status)
        .first::<String>(connection)
        .optional();
    match current {
        Ok(None) => ServiceRequestRepositoryError::NotFound(id),
        Ok(Some(persisted)) => match RequestStatus::try_from(persisted.as_str()) {
            Ok(actual) => ServiceRequestRepositoryError::StatusConflict {
                id,
                expected,
                actual,
            },
            Err(err) => ServiceRequestRepositoryError::persistence(err),
        },
        Err(err) => ServiceRequestRepositoryError::persistence(err),
    }
}

fn to_row(request: &ServiceRequest) -> ServiceRequestRow {
    let draft = request.draft();
    let coordinates = draft.location().coordinates();
    ServiceRequestRow {
        id: request.id().into_inner(),
        requester_id: request.requester().into_inner(),
        assignee_id: request.assignee().map(UserId::into_inner),
        issue_description: draft.issue().as_str().to_owned(),
        location_label: draft.location().label().to_owned(),
        latitude: coordinates.map(Coordinates::latitude),
        longitude: coordinates.map(Coordinates::longitude),
        mechanic_type: draft.mechanic_type().as_str().to_owned(),
        status: request.status().as_str().to_owned(),
        dispatch: request.dispatch().as_str().to_owned(),
        rating: request.rating().map(|stars| i16::from(stars.value())),
        feedback: request.feedback().map(str::to_owned),
        created_at: request.created_at(),
        updated_at: request.updated_at(),
    }
}

fn row_to_request(row: ServiceRequestRow) -> ServiceRequestRepositoryResult<ServiceRequest> {
    let ServiceRequestRow {
        id,
        requester_id,
        assignee_id,
        issue_description,
        location_label,
        latitude,
        longitude,
        mechanic_type: persisted_type,
        status: persisted_status,
        dispatch: persisted_dispatch,
        rating: persisted_rating,
        feedback,
        created_at,
        updated_at,
    } = row;

    let issue =
        IssueDescription::new(issue_description).map_err(ServiceRequestRepositoryError::persistence)?;
    let coordinates = Coordinates::from_optional(latitude, longitude)
        .map_err(ServiceRequestRepositoryError::persistence)?;
    let mechanic_type = MechanicType::try_from(persisted_type.as_str())
        .map_err(ServiceRequestRepositoryError::persistence)?;
    let status = RequestStatus::try_from(persisted_status.as_str())
        .map_err(ServiceRequestRepositoryError::persistence)?;
    let dispatch = Dispatch::try_from(persisted_dispatch.as_str())
        .map_err(ServiceRequestRepositoryError::persistence)?;
    let rating = persisted_rating
        .map(|stars| StarRating::new(i64::from(stars)))
        .transpose()
        .map_err(ServiceRequestRepositoryError::persistence)?;

    Ok(ServiceRequest::from_persisted(PersistedServiceRequestData {
        id: ServiceRequestId::from_uuid(id),
        requester: UserId::from_uuid(requester_id),
        assignee: assignee_id.map(UserId::from_uuid),
        draft: RequestDraft::new(
            issue,
            RequestLocation::new(location_label, coordinates),
            mechanic_type,
        ),
        status,
        dispatch,
        rating,
        feedback,
        created_at,
        updated_at,
    }))
}
