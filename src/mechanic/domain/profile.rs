//! Mechanic workshop profile as exposed by the identity collaborator.

use super::{Coordinates, MechanicTypeSet};
use crate::identity::UserId;
use serde::{Deserialize, Serialize};

/// Workshop details used for proximity matching and profile display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicProfile {
    mechanic_id: UserId,
    shop_name: String,
    location: String,
    coordinates: Option<Coordinates>,
    mechanic_types: MechanicTypeSet,
}

impl MechanicProfile {
    /// Creates a profile with no shop details and no map location.
    #[must_use]
    pub fn new(mechanic_id: UserId, mechanic_types: MechanicTypeSet) -> Self {
        Self {
            mechanic_id,
            shop_name: String::new(),
            location: String::new(),
            coordinates: None,
            mechanic_types,
        }
    }

    /// Sets the shop name.
    #[must_use]
    pub fn with_shop_name(mut self, shop_name: impl Into<String>) -> Self {
        self.shop_name = shop_name.into().trim().to_owned();
        self
    }

    /// Sets the free-text location label.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into().trim().to_owned();
        self
    }

    /// Pins the workshop on the map.
    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Returns the mechanic identity.
    #[must_use]
    pub const fn mechanic_id(&self) -> UserId {
        self.mechanic_id
    }

    /// Returns the shop name, empty when not provided.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }

    /// Returns the location label, empty when not provided.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the workshop coordinates, if pinned.
    #[must_use]
    pub const fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Returns the registered service categories.
    #[must_use]
    pub const fn mechanic_types(&self) -> &MechanicTypeSet {
        &self.mechanic_types
    }
}
