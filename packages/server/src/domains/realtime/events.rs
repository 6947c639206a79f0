//! Named events crossing the realtime channel boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outbound: a ride is available for pickup (to eligible captains).
pub const NEW_RIDE: &str = "new-ride";
/// Outbound: a captain accepted the ride (to the rider).
pub const RIDE_CONFIRMED: &str = "ride-confirmed";
/// Outbound: OTP verified, trip underway (to the rider).
pub const RIDE_STARTED: &str = "ride-started";
/// Outbound: trip completed (to the rider).
pub const RIDE_ENDED: &str = "ride-ended";
/// Outbound: a delivery-local problem with an inbound message.
pub const ERROR: &str = "error";

/// What kind of entity a channel is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Rider,
    Captain,
}

/// One outbound message: event name plus JSON payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Envelope {
    pub event: String,
    pub data: serde_json::Value,
}

impl Envelope {
    pub fn new(event: &str, data: serde_json::Value) -> Self {
        Self {
            event: event.to_string(),
            data,
        }
    }
}

/// Location fields as clients send them; either may be missing.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationPayload {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Inbound messages arriving on a connection channel.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum InboundMessage {
    Join {
        entity_id: Uuid,
        entity_type: EntityKind,
    },
    UpdateLocation {
        entity_id: Uuid,
        location: Option<LocationPayload>,
    },
}
