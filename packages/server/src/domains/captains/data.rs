//! In-memory captain directory.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::geo::Coordinates;
use crate::domains::captains::models::{Availability, Captain};
use crate::kernel::BaseCaptainDirectory;

/// Directory backed by a process-local map. Writes go through a single
/// lock, which serializes connect/disconnect/location updates for any
/// given captain.
#[derive(Default)]
pub struct MemoryCaptainDirectory {
    inner: RwLock<HashMap<Uuid, Captain>>,
}

impl MemoryCaptainDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseCaptainDirectory for MemoryCaptainDirectory {
    async fn upsert(&self, captain: Captain) -> Result<()> {
        self.inner.write().await.insert(captain.id, captain);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Captain>> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn find_connected(&self) -> Result<Vec<Captain>> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .filter(|captain| captain.is_connected())
            .cloned()
            .collect())
    }

    async fn set_channel(&self, id: Uuid, channel: Uuid) -> Result<()> {
        if let Some(captain) = self.inner.write().await.get_mut(&id) {
            captain.channel = Some(channel);
            captain.availability = Availability::Active;
        }
        Ok(())
    }

    async fn clear_channel(&self, channel: Uuid) -> Result<Option<Uuid>> {
        let mut captains = self.inner.write().await;
        let found = captains
            .values_mut()
            .find(|captain| captain.channel == Some(channel));

        Ok(match found {
            Some(captain) => {
                captain.channel = None;
                captain.availability = Availability::Inactive;
                Some(captain.id)
            }
            None => None,
        })
    }

    async fn update_location(&self, id: Uuid, location: Coordinates) -> Result<()> {
        if let Some(captain) = self.inner.write().await.get_mut(&id) {
            captain.location = Some(location);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::pricing::VehicleClass;

    #[tokio::test]
    async fn set_channel_marks_captain_active() {
        let directory = MemoryCaptainDirectory::new();
        let captain = Captain::new("Asha", VehicleClass::Car);
        let id = captain.id;
        directory.upsert(captain).await.unwrap();

        let channel = Uuid::new_v4();
        directory.set_channel(id, channel).await.unwrap();

        let stored = directory.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.channel, Some(channel));
        assert_eq!(stored.availability, Availability::Active);
    }

    #[tokio::test]
    async fn clear_channel_marks_captain_inactive() {
        let directory = MemoryCaptainDirectory::new();
        let captain = Captain::new("Asha", VehicleClass::Car);
        let id = captain.id;
        directory.upsert(captain).await.unwrap();

        let channel = Uuid::new_v4();
        directory.set_channel(id, channel).await.unwrap();
        let cleared = directory.clear_channel(channel).await.unwrap();

        assert_eq!(cleared, Some(id));
        let stored = directory.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.channel, None);
        assert_eq!(stored.availability, Availability::Inactive);
    }

    #[tokio::test]
    async fn find_connected_skips_disconnected_captains() {
        let directory = MemoryCaptainDirectory::new();
        let connected = Captain::new("Asha", VehicleClass::Car);
        let connected_id = connected.id;
        let disconnected = Captain::new("Ravi", VehicleClass::Moto);
        directory.upsert(connected).await.unwrap();
        directory.upsert(disconnected).await.unwrap();
        directory
            .set_channel(connected_id, Uuid::new_v4())
            .await
            .unwrap();

        let found = directory.find_connected().await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, connected_id);
    }
}
