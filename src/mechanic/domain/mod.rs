//! Domain model for mechanic profiles and geographic matching.

mod coordinates;
mod error;
mod mechanic_type;
mod nearby;
mod profile;

pub use coordinates::{Coordinates, EARTH_RADIUS_KM, round_to_hundredths};
pub use error::{GeoDomainError, ParseMechanicTypeError};
pub use mechanic_type::{MechanicType, MechanicTypeSet};
pub use nearby::NearbyMechanic;
pub use profile::MechanicProfile;
