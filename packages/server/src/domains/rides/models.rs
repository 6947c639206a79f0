use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domains::captains::models::Captain;
use crate::domains::pricing::VehicleClass;
use crate::domains::riders::models::Rider;

/// Lifecycle position of a ride. Advances monotonically along
/// requested -> accepted -> ongoing -> completed; no state is revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    Requested,
    Accepted,
    Ongoing,
    Completed,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Requested => "requested",
            RideStatus::Accepted => "accepted",
            RideStatus::Ongoing => "ongoing",
            RideStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted ride record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ride {
    pub id: Uuid,
    /// Requesting rider; set at creation, immutable.
    pub rider: Uuid,
    /// Assigned captain; set exactly once, at acceptance.
    pub captain: Option<Uuid>,
    /// Free-text addresses; used transiently for pricing and matching,
    /// never normalized to coordinates in the record.
    pub pickup: String,
    pub destination: String,
    pub vehicle: VehicleClass,
    pub status: RideStatus,
    /// 6-digit code proving rider presence; disclosed to the creator
    /// once, redacted everywhere else.
    pub otp: String,
    /// Fare for the chosen vehicle class, fixed at creation.
    pub fare: i64,
    pub distance_m: u32,
    pub duration_s: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A ride populated with its rider and captain, as returned by lifecycle
/// operations and pushed over the realtime channel.
#[derive(Debug, Clone, Serialize)]
pub struct RideDetails {
    pub id: Uuid,
    pub rider: Rider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captain: Option<Captain>,
    pub pickup: String,
    pub destination: String,
    pub vehicle: VehicleClass,
    pub status: RideStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    pub fare: i64,
    pub distance_m: u32,
    pub duration_s: u32,
    pub created_at: DateTime<Utc>,
}

impl RideDetails {
    /// Assemble the populated view. `with_otp` grants the one elevated
    /// disclosure at creation; everything else reads redacted.
    pub fn from_parts(ride: Ride, rider: Rider, captain: Option<Captain>, with_otp: bool) -> Self {
        Self {
            id: ride.id,
            rider,
            captain,
            pickup: ride.pickup,
            destination: ride.destination,
            vehicle: ride.vehicle,
            status: ride.status,
            otp: with_otp.then_some(ride.otp),
            fare: ride.fare,
            distance_m: ride.distance_m,
            duration_s: ride.duration_s,
            created_at: ride.created_at,
        }
    }

    /// Copy with the OTP withheld, for broadcast payloads.
    pub fn redacted(mut self) -> Self {
        self.otp = None;
        self
    }
}
