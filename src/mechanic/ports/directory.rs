//! Directory port listing mechanic workshop profiles.

use crate::identity::UserId;
use crate::mechanic::domain::{MechanicProfile, MechanicType};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mechanic directory operations.
pub type MechanicDirectoryResult<T> = Result<T, MechanicDirectoryError>;

/// Read access to mechanic profiles, plus the profile upsert used when a
/// mechanic edits their workshop.
#[async_trait]
pub trait MechanicDirectory: Send + Sync {
    /// Creates or replaces the profile for `profile.mechanic_id()`.
    ///
    /// A replaced profile keeps its position in enumeration order.
    async fn upsert(&self, profile: &MechanicProfile) -> MechanicDirectoryResult<()>;

    /// Finds a mechanic profile.
    ///
    /// Returns `None` when the identity is not a registered mechanic.
    async fn find(&self, mechanic_id: UserId) -> MechanicDirectoryResult<Option<MechanicProfile>>;

    /// Returns every profile that has coordinates and is registered for
    /// `mechanic_type`, in stable enumeration (registration) order.
    async fn located_with_type(
        &self,
        mechanic_type: MechanicType,
    ) -> MechanicDirectoryResult<Vec<MechanicProfile>>;
}

/// Errors returned by mechanic directory implementations.
#[derive(Debug, Clone, Error)]
pub enum MechanicDirectoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MechanicDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
