use anyhow::Result;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::common::geo::Coordinates;
use crate::domains::realtime::events::{
    self, EntityKind, Envelope, InboundMessage, LocationPayload,
};
use crate::kernel::{BaseCaptainDirectory, BaseRiderDirectory};

#[derive(Default)]
struct Registry {
    senders: HashMap<Uuid, mpsc::UnboundedSender<Envelope>>,
    bindings: HashMap<Uuid, (EntityKind, Uuid)>,
}

/// Connection-channel registry plus at-most-once delivery.
///
/// Mutations take the registry write lock and hold it across the
/// directory update, so a disconnect racing a join or location update
/// for the same entity cannot interleave.
#[derive(Clone)]
pub struct EventGateway {
    registry: Arc<RwLock<Registry>>,
    riders: Arc<dyn BaseRiderDirectory>,
    captains: Arc<dyn BaseCaptainDirectory>,
}

impl EventGateway {
    pub fn new(
        riders: Arc<dyn BaseRiderDirectory>,
        captains: Arc<dyn BaseCaptainDirectory>,
    ) -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
            riders,
            captains,
        }
    }

    /// Allocate a channel for a new connection. The transport pumps the
    /// returned receiver for as long as the connection lives.
    pub async fn open_channel(&self) -> (Uuid, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let channel = Uuid::new_v4();
        self.registry.write().await.senders.insert(channel, tx);
        (channel, rx)
    }

    /// Route one inbound message from a connection.
    pub async fn handle_message(&self, channel: Uuid, message: InboundMessage) -> Result<()> {
        match message {
            InboundMessage::Join {
                entity_id,
                entity_type,
            } => self.join(channel, entity_id, entity_type).await,
            InboundMessage::UpdateLocation {
                entity_id,
                location,
            } => self.update_location(channel, entity_id, location).await,
        }
    }

    /// Bind a channel to an entity. Captains additionally become active.
    pub async fn join(&self, channel: Uuid, entity_id: Uuid, kind: EntityKind) -> Result<()> {
        let mut registry = self.registry.write().await;
        if !registry.senders.contains_key(&channel) {
            warn!(%channel, %entity_id, "join on unknown channel ignored");
            return Ok(());
        }
        registry.bindings.insert(channel, (kind, entity_id));

        match kind {
            EntityKind::Rider => self.riders.set_channel(entity_id, channel).await?,
            EntityKind::Captain => self.captains.set_channel(entity_id, channel).await?,
        }
        info!(%entity_id, ?kind, %channel, "entity joined");
        Ok(())
    }

    /// Overwrite a captain's reported location. Malformed payloads and
    /// updates from a channel not bound to that captain get a
    /// delivery-local `error` event on the offending channel and change
    /// nothing.
    pub async fn update_location(
        &self,
        channel: Uuid,
        captain_id: Uuid,
        location: Option<LocationPayload>,
    ) -> Result<()> {
        let coordinates = match location {
            Some(LocationPayload {
                lat: Some(lat),
                lng: Some(lng),
            }) => Coordinates::new(lat, lng),
            _ => {
                self.send(Some(channel), events::ERROR, json!({ "message": "Invalid location data" }))
                    .await;
                return Ok(());
            }
        };

        let registry = self.registry.write().await;
        let bound = matches!(
            registry.bindings.get(&channel),
            Some((EntityKind::Captain, id)) if *id == captain_id
        );
        if !bound {
            drop(registry);
            warn!(%channel, %captain_id, "location update from unbound channel rejected");
            self.send(Some(channel), events::ERROR, json!({ "message": "Channel not bound to captain" }))
                .await;
            return Ok(());
        }
        self.captains.update_location(captain_id, coordinates).await?;
        drop(registry);
        Ok(())
    }

    /// Tear down a disconnected channel: drop the sender, clear whichever
    /// entity was bound, mark captains inactive.
    pub async fn unregister(&self, channel: Uuid) -> Result<()> {
        let mut registry = self.registry.write().await;
        registry.senders.remove(&channel);
        let binding = registry.bindings.remove(&channel);

        match binding {
            Some((EntityKind::Rider, _)) => {
                self.riders.clear_channel(channel).await?;
            }
            Some((EntityKind::Captain, _)) => {
                self.captains.clear_channel(channel).await?;
            }
            None => {
                // Connection never joined; nothing bound to clear.
            }
        }
        info!(%channel, "channel unregistered");
        Ok(())
    }

    /// Best-effort, at-most-once delivery. An absent channel or a gone
    /// receiver drops the message with a log line; nothing is queued or
    /// retried, and the caller never sees a failure.
    pub async fn send(&self, channel: Option<Uuid>, event: &str, data: serde_json::Value) {
        let Some(channel) = channel else {
            warn!(event, "no channel bound, dropping event");
            return;
        };

        let registry = self.registry.read().await;
        match registry.senders.get(&channel) {
            Some(tx) => {
                if tx.send(Envelope::new(event, data)).is_err() {
                    warn!(%channel, event, "receiver gone, dropping event");
                }
            }
            None => warn!(%channel, event, "unknown channel, dropping event"),
        }
    }
}
