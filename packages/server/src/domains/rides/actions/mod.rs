//! Ride domain actions - the lifecycle operations.
//!
//! Actions are async functions called by the controller layer. Each one
//! validates, mutates through the store, and pushes the resulting status
//! event over the gateway; gateway failures never fail the operation.

mod confirm_ride;
mod create_ride;
mod end_ride;
mod queries;
mod start_ride;
mod stats;

pub use confirm_ride::confirm_ride;
pub use create_ride::{create_and_dispatch, create_ride};
pub use end_ride::end_ride;
pub use queries::{get_fare, get_suggestions, FareResponse};
pub use start_ride::start_ride;
pub use stats::{captain_stats, CaptainStats};

use anyhow::anyhow;
use serde_json::Value;

use crate::domains::rides::errors::RideError;
use crate::domains::rides::models::{Ride, RideDetails};
use crate::kernel::{BaseCaptainDirectory, BaseRiderDirectory, ServerDeps};

/// Populate a ride with its rider and (when assigned) captain.
pub(crate) async fn populate(
    ride: Ride,
    deps: &ServerDeps,
    with_otp: bool,
) -> Result<RideDetails, RideError> {
    let rider = deps
        .riders
        .find_by_id(ride.rider)
        .await?
        .ok_or_else(|| anyhow!("ride {} references unknown rider {}", ride.id, ride.rider))?;

    let captain = match ride.captain {
        Some(captain_id) => deps.captains.find_by_id(captain_id).await?,
        None => None,
    };

    Ok(RideDetails::from_parts(ride, rider, captain, with_otp))
}

/// Serialize a redacted event payload for the gateway.
pub(crate) fn event_payload(details: &RideDetails) -> Result<Value, RideError> {
    serde_json::to_value(details.clone().redacted())
        .map_err(|e| RideError::Internal(anyhow!("payload serialization failed: {e}")))
}
