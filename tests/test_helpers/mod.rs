//! Shared helpers for integration tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use roadside::{
    identity::UserId,
    mechanic::{
        domain::{Coordinates, MechanicProfile, MechanicType, MechanicTypeSet},
        ports::MechanicDirectory,
    },
};
use std::sync::{Mutex, PoisonError};

/// Clock that only moves when a test advances it.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at a fixed morning instant.
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
            .single()
            .unwrap_or_default();
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registers a located mechanic offering `types` and returns their id.
///
/// # Errors
///
/// Returns an error when the coordinates are invalid or the directory write
/// fails.
pub async fn register_mechanic(
    directory: &impl MechanicDirectory,
    shop_name: &str,
    latitude: f64,
    longitude: f64,
    types: &[MechanicType],
) -> Result<UserId, eyre::Report> {
    let mechanic = UserId::new();
    let profile = MechanicProfile::new(mechanic, MechanicTypeSet::new(types.iter().copied()))
        .with_shop_name(shop_name)
        .with_coordinates(Coordinates::new(latitude, longitude)?);
    directory.upsert(&profile).await?;
    Ok(mechanic)
}
