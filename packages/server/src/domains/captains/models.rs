use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::geo::Coordinates;
use crate::domains::pricing::VehicleClass;

/// Whether a captain is taking rides. Driven by gateway connect and
/// disconnect, never set directly by lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Active,
    Inactive,
}

/// A driver, as consumed by matching and notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Captain {
    pub id: Uuid,
    pub name: String,
    pub vehicle: VehicleClass,
    /// Last reported position; absent until the first location update.
    pub location: Option<Coordinates>,
    /// Live connection channel while connected.
    pub channel: Option<Uuid>,
    pub availability: Availability,
}

impl Captain {
    pub fn new(name: impl Into<String>, vehicle: VehicleClass) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            vehicle,
            location: None,
            channel: None,
            availability: Availability::Inactive,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_some()
    }
}
