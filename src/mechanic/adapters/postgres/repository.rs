//! `PostgreSQL` mechanic directory.

use super::{
    models::{MechanicProfileRow, NewMechanicProfileRow},
    schema::mechanic_profiles,
};
use crate::identity::UserId;
use crate::mechanic::{
    domain::{Coordinates, MechanicProfile, MechanicType, MechanicTypeSet},
    ports::{MechanicDirectory, MechanicDirectoryError, MechanicDirectoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::upsert::excluded;

/// `PostgreSQL` connection pool type used by mechanic adapters.
pub type MechanicPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed mechanic directory.
#[derive(Debug, Clone)]
pub struct PostgresMechanicDirectory {
    pool: MechanicPgPool,
}

impl PostgresMechanicDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MechanicPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MechanicDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MechanicDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MechanicDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MechanicDirectoryError::persistence)?
    }
}

#[async_trait]
impl MechanicDirectory for PostgresMechanicDirectory {
    async fn upsert(&self, profile: &MechanicProfile) -> MechanicDirectoryResult<()> {
        let new_row = to_new_row(profile);
        self.run_blocking(move |connection| {
            diesel::insert_into(mechanic_profiles::table)
                .values(&new_row)
                .on_conflict(mechanic_profiles::mechanic_id)
                .do_update()
                .set((
                    mechanic_profiles::shop_name.eq(excluded(mechanic_profiles::shop_name)),
                    mechanic_profiles::location_label
                        .eq(excluded(mechanic_profiles::location_label)),
                    mechanic_profiles::latitude.eq(excluded(mechanic_profiles::latitude)),
                    mechanic_profiles::longitude.eq(excluded(mechanic_profiles::longitude)),
                    mechanic_profiles::mechanic_types
                        .eq(excluded(mechanic_profiles::mechanic_types)),
                ))
                .execute(connection)
                .map_err(MechanicDirectoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find(&self, mechanic_id: UserId) -> MechanicDirectoryResult<Option<MechanicProfile>> {
        self.run_blocking(move |connection| {
            let row = mechanic_profiles::table
                .filter(mechanic_profiles::mechanic_id.eq(mechanic_id.into_inner()))
                .select(MechanicProfileRow::as_select())
                .first::<MechanicProfileRow>(connection)
                .optional()
                .map_err(MechanicDirectoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn located_with_type(
        &self,
        mechanic_type: MechanicType,
    ) -> MechanicDirectoryResult<Vec<MechanicProfile>> {
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT mechanic_id, shop_name, location_label, latitude, longitude, ",
                "mechanic_types, registered_at FROM mechanic_profiles ",
                "WHERE latitude IS NOT NULL AND longitude IS NOT NULL ",
                "AND $1 = ANY(mechanic_types) ",
                "ORDER BY registered_at, mechanic_id",
            ))
            .bind::<diesel::sql_types::Text, _>(mechanic_type.as_str())
            .load::<MechanicProfileRow>(connection)
            .map_err(MechanicDirectoryError::persistence)?;
            rows.into_iter().map(row_to_profile).collect()
        })
        .await
    }
}

fn to_new_row(profile: &MechanicProfile) -> NewMechanicProfileRow {
    let coordinates = profile.coordinates();
    NewMechanicProfileRow {
        mechanic_id: profile.mechanic_id().into_inner(),
        shop_name: profile.shop_name().to_owned(),
        location_label: profile.location().to_owned(),
        latitude: coordinates.map(Coordinates::latitude),
        longitude: coordinates.map(Coordinates::longitude),
        mechanic_types: profile.mechanic_types().to_storage_values(),
    }
}

fn row_to_profile(row: MechanicProfileRow) -> MechanicDirectoryResult<MechanicProfile> {
    let MechanicProfileRow {
        mechanic_id,
        shop_name,
        location_label,
        latitude,
        longitude,
        mechanic_types: persisted_types,
        registered_at: _,
    } = row;

    let mechanic_types = MechanicTypeSet::from_storage_values(&persisted_types)
        .map_err(MechanicDirectoryError::persistence)?;
    let coordinates = Coordinates::from_optional(latitude, longitude)
        .map_err(MechanicDirectoryError::persistence)?;

    let mut profile = MechanicProfile::new(UserId::from_uuid(mechanic_id), mechanic_types)
        .with_shop_name(shop_name)
        .with_location(location_label);
    if let Some(pinned) = coordinates {
        profile = profile.with_coordinates(pinned);
    }
    Ok(profile)
}
