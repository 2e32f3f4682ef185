//! In-memory mechanic directory for tests and embedded use.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::identity::UserId;
use crate::mechanic::{
    domain::{MechanicProfile, MechanicType},
    ports::{MechanicDirectory, MechanicDirectoryError, MechanicDirectoryResult},
};

/// Thread-safe in-memory directory preserving registration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMechanicDirectory {
    profiles: Arc<RwLock<Vec<MechanicProfile>>>,
}

impl InMemoryMechanicDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> MechanicDirectoryError {
    MechanicDirectoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MechanicDirectory for InMemoryMechanicDirectory {
    async fn upsert(&self, profile: &MechanicProfile) -> MechanicDirectoryResult<()> {
        let mut profiles = self.profiles.write().map_err(lock_error)?;
        let existing = profiles
            .iter_mut()
            .find(|stored| stored.mechanic_id() == profile.mechanic_id());
        match existing {
            Some(stored) => *stored = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        Ok(())
    }

    async fn find(&self, mechanic_id: UserId) -> MechanicDirectoryResult<Option<MechanicProfile>> {
        let profiles = self.profiles.read().map_err(lock_error)?;
        Ok(profiles
            .iter()
            .find(|profile| profile.mechanic_id() == mechanic_id)
            .cloned())
    }

    async fn located_with_type(
        &self,
        mechanic_type: MechanicType,
    ) -> MechanicDirectoryResult<Vec<MechanicProfile>> {
        let profiles = self.profiles.read().map_err(lock_error)?;
        Ok(profiles
            .iter()
            .filter(|profile| {
                profile.coordinates().is_some() && profile.mechanic_types().contains(mechanic_type)
            })
            .cloned()
            .collect())
    }
}
