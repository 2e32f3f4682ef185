//! Service categories a mechanic can register for.

use super::ParseMechanicTypeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Repair specialty requested by a customer and offered by a mechanic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MechanicType {
    /// Motorcycles and scooters.
    TwoWheeler,
    /// Cars and light vehicles.
    Automotive,
    /// Trucks, buses and other heavy vehicles.
    HeavyVehicle,
}

impl MechanicType {
    /// Every supported mechanic type.
    pub const ALL: [Self; 3] = [Self::TwoWheeler, Self::Automotive, Self::HeavyVehicle];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwoWheeler => "two_wheeler",
            Self::Automotive => "automotive",
            Self::HeavyVehicle => "heavy_vehicle",
        }
    }

    /// Returns a human-readable label used in notification text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TwoWheeler => "two wheeler",
            Self::Automotive => "automotive",
            Self::HeavyVehicle => "heavy vehicle",
        }
    }
}

impl fmt::Display for MechanicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MechanicType {
    type Error = ParseMechanicTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "two_wheeler" => Ok(Self::TwoWheeler),
            "automotive" => Ok(Self::Automotive),
            "heavy_vehicle" => Ok(Self::HeavyVehicle),
            _ => Err(ParseMechanicTypeError(value.to_owned())),
        }
    }
}

/// Set of service categories a mechanic is registered for.
///
/// Membership is exact: `automotive` never matches inside another token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MechanicTypeSet(BTreeSet<MechanicType>);

impl MechanicTypeSet {
    /// Creates a set from the given types, ignoring duplicates.
    #[must_use]
    pub fn new(types: impl IntoIterator<Item = MechanicType>) -> Self {
        Self(types.into_iter().collect())
    }

    /// Parses the comma-joined encoding used by older profile records.
    ///
    /// Blank tokens are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseMechanicTypeError`] for any token that is not a known
    /// mechanic type.
    pub fn parse_legacy(encoded: &str) -> Result<Self, ParseMechanicTypeError> {
        encoded
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(MechanicType::try_from)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Parses storage values (one token per element).
    ///
    /// # Errors
    ///
    /// Returns [`ParseMechanicTypeError`] for any unknown token.
    pub fn from_storage_values<S: AsRef<str>>(
        values: &[S],
    ) -> Result<Self, ParseMechanicTypeError> {
        values
            .iter()
            .map(|value| MechanicType::try_from(value.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Returns the storage values in canonical order.
    #[must_use]
    pub fn to_storage_values(&self) -> Vec<String> {
        self.0.iter().map(|t| t.as_str().to_owned()).collect()
    }

    /// Returns whether the set contains `mechanic_type`.
    #[must_use]
    pub fn contains(&self, mechanic_type: MechanicType) -> bool {
        self.0.contains(&mechanic_type)
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the registered types in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = MechanicType> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<MechanicType> for MechanicTypeSet {
    fn from_iter<I: IntoIterator<Item = MechanicType>>(iter: I) -> Self {
        Self::new(iter)
    }
}
