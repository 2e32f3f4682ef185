//! `PostgreSQL` rating repository.

use super::{
    models::{LegacyFeedbackRow, MechanicRatingRow, NewMechanicRatingRow},
    schema::{legacy_feedback, mechanic_ratings},
};
use crate::identity::UserId;
use crate::rating::{
    domain::{
        FeedbackId, LegacyFeedback, MechanicRating, PersistedFeedbackData, PersistedRatingData,
        RatingId, StarRating,
    },
    ports::{RatingRepository, RatingRepositoryError, RatingRepositoryResult},
};
use crate::service_request::domain::ServiceRequestId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::upsert::excluded;

/// `PostgreSQL` connection pool type used by rating adapters.
pub type RatingPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed rating repository.
#[derive(Debug, Clone)]
pub struct PostgresRatingRepository {
    pool: RatingPgPool,
}

impl PostgresRatingRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RatingPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RatingRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RatingRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RatingRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RatingRepositoryError::persistence)?
    }
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn upsert(&self, rating: &MechanicRating) -> RatingRepositoryResult<MechanicRating> {
        let new_row = to_new_rating_row(rating);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(mechanic_ratings::table)
                .values(&new_row)
                .on_conflict(mechanic_ratings::service_request_id)
                .do_update()
                .set((
                    mechanic_ratings::mechanic_id.eq(excluded(mechanic_ratings::mechanic_id)),
                    mechanic_ratings::customer_id.eq(excluded(mechanic_ratings::customer_id)),
                    mechanic_ratings::rating.eq(excluded(mechanic_ratings::rating)),
                    mechanic_ratings::feedback.eq(excluded(mechanic_ratings::feedback)),
                    mechanic_ratings::updated_at.eq(excluded(mechanic_ratings::updated_at)),
                ))
                .returning(MechanicRatingRow::as_returning())
                .get_result::<MechanicRatingRow>(connection)
                .map_err(RatingRepositoryError::persistence)?;
            row_to_rating(row)
        })
        .await
    }

    async fn find_by_request(
        &self,
        request_id: ServiceRequestId,
    ) -> RatingRepositoryResult<Option<MechanicRating>> {
        self.run_blocking(move |connection| {
            let row = mechanic_ratings::table
                .filter(mechanic_ratings::service_request_id.eq(request_id.into_inner()))
                .select(MechanicRatingRow::as_select())
                .first::<MechanicRatingRow>(connection)
                .optional()
                .map_err(RatingRepositoryError::persistence)?;
            row.map(row_to_rating).transpose()
        })
        .await
    }

    async fn list_for_mechanic(
        &self,
        mechanic_id: UserId,
    ) -> RatingRepositoryResult<Vec<MechanicRating>> {
        self.run_blocking(move |connection| {
            let rows = mechanic_ratings::table
                .filter(mechanic_ratings::mechanic_id.eq(mechanic_id.into_inner()))
                .order((
                    mechanic_ratings::created_at.desc(),
                    mechanic_ratings::id.asc(),
                ))
                .select(MechanicRatingRow::as_select())
                .load::<MechanicRatingRow>(connection)
                .map_err(RatingRepositoryError::persistence)?;
            rows.into_iter().map(row_to_rating).collect()
        })
        .await
    }

    async fn store_feedback(&self, feedback: &LegacyFeedback) -> RatingRepositoryResult<()> {
        let new_row = to_feedback_row(feedback);
        self.run_blocking(move |connection| {
            diesel::insert_into(legacy_feedback::table)
                .values(&new_row)
                .execute(connection)
                .map_err(RatingRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_feedback_for_mechanic(
        &self,
        mechanic_id: UserId,
    ) -> RatingRepositoryResult<Vec<LegacyFeedback>> {
        self.run_blocking(move |connection| {
            let rows = legacy_feedback::table
                .filter(legacy_feedback::mechanic_id.eq(mechanic_id.into_inner()))
                .order((legacy_feedback::created_at.desc(), legacy_feedback::id.asc()))
                .select(LegacyFeedbackRow::as_select())
                .load::<LegacyFeedbackRow>(connection)
                .map_err(RatingRepositoryError::persistence)?;
            rows.into_iter().map(row_to_feedback).collect()
        })
        .await
    }
}

fn to_new_rating_row(rating: &MechanicRating) -> NewMechanicRatingRow {
    NewMechanicRatingRow {
        id: rating.id().into_inner(),
        service_request_id: rating.service_request_id().into_inner(),
        mechanic_id: rating.mechanic_id().into_inner(),
        customer_id: rating.customer_id().into_inner(),
        rating: i16::from(rating.rating().value()),
        feedback: rating.feedback().map(str::to_owned),
        created_at: rating.created_at(),
        updated_at: rating.updated_at(),
    }
}

fn row_to_rating(row: MechanicRatingRow) -> RatingRepositoryResult<MechanicRating> {
    let rating =
        StarRating::new(i64::from(row.rating)).map_err(RatingRepositoryError::persistence)?;
    Ok(MechanicRating::from_persisted(PersistedRatingData {
        id: RatingId::from_uuid(row.id),
        service_request_id: ServiceRequestId::from_uuid(row.service_request_id),
        mechanic_id: UserId::from_uuid(row.mechanic_id),
        customer_id: UserId::from_uuid(row.customer_id),
        rating,
        feedback: row.feedback,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn to_feedback_row(feedback: &LegacyFeedback) -> LegacyFeedbackRow {
    LegacyFeedbackRow {
        id: feedback.id().into_inner(),
        mechanic_id: feedback.mechanic_id().into_inner(),
        customer_id: feedback.customer_id().into_inner(),
        rating: i16::from(feedback.rating().value()),
        comment: feedback.comment().map(str::to_owned),
        created_at: feedback.created_at(),
    }
}

fn row_to_feedback(row: LegacyFeedbackRow) -> RatingRepositoryResult<LegacyFeedback> {
    let rating =
        StarRating::new(i64::from(row.rating)).map_err(RatingRepositoryError::persistence)?;
    Ok(LegacyFeedback::from_persisted(PersistedFeedbackData {
        id: FeedbackId::from_uuid(row.id),
        mechanic_id: UserId::from_uuid(row.mechanic_id),
        customer_id: UserId::from_uuid(row.customer_id),
        rating,
        comment: row.comment,
        created_at: row.created_at,
    }))
}
