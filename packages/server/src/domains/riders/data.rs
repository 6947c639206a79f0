//! In-memory rider directory.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domains::riders::models::Rider;
use crate::kernel::BaseRiderDirectory;

#[derive(Default)]
pub struct MemoryRiderDirectory {
    inner: RwLock<HashMap<Uuid, Rider>>,
}

impl MemoryRiderDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRiderDirectory for MemoryRiderDirectory {
    async fn upsert(&self, rider: Rider) -> Result<()> {
        self.inner.write().await.insert(rider.id, rider);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rider>> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn set_channel(&self, id: Uuid, channel: Uuid) -> Result<()> {
        if let Some(rider) = self.inner.write().await.get_mut(&id) {
            rider.channel = Some(channel);
        }
        Ok(())
    }

    async fn clear_channel(&self, channel: Uuid) -> Result<Option<Uuid>> {
        let mut riders = self.inner.write().await;
        let found = riders.values_mut().find(|rider| rider.channel == Some(channel));

        Ok(match found {
            Some(rider) => {
                rider.channel = None;
                Some(rider.id)
            }
            None => None,
        })
    }
}
