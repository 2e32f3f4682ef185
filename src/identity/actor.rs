//! Authenticated caller and marketplace roles.

use super::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Marketplace role attached to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A customer raising service requests.
    Customer,
    /// A mechanic answering service requests.
    Mechanic,
    /// An administrator with override powers.
    Admin,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Mechanic => "mechanic",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "customer" => Ok(Self::Customer),
            "mechanic" => Ok(Self::Mechanic),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Error returned while parsing a role string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor from an identity and role.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Creates a customer actor.
    #[must_use]
    pub const fn customer(id: UserId) -> Self {
        Self::new(id, Role::Customer)
    }

    /// Creates a mechanic actor.
    #[must_use]
    pub const fn mechanic(id: UserId) -> Self {
        Self::new(id, Role::Mechanic)
    }

    /// Creates an administrator actor.
    #[must_use]
    pub const fn admin(id: UserId) -> Self {
        Self::new(id, Role::Admin)
    }

    /// Returns the actor identity.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the actor role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}
