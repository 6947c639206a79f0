//! Confirm ride action - conditional captain assignment.

use tracing::info;
use uuid::Uuid;

use crate::domains::realtime::events;
use crate::domains::rides::errors::RideError;
use crate::domains::rides::models::RideDetails;
use crate::kernel::{AssignOutcome, BaseCaptainDirectory, BaseRideStore, ServerDeps};

/// Assign `captain_id` to a requested ride and move it to accepted.
///
/// The assignment is a compare-and-swap on the requested status: of two
/// concurrent confirms, exactly one wins and the loser sees `Conflict`.
pub async fn confirm_ride(
    ride_id: Uuid,
    captain_id: Uuid,
    deps: &ServerDeps,
) -> Result<RideDetails, RideError> {
    if deps.captains.find_by_id(captain_id).await?.is_none() {
        return Err(RideError::Validation("captain"));
    }

    let ride = match deps.rides.assign_captain(ride_id, captain_id).await? {
        AssignOutcome::Assigned(ride) => ride,
        AssignOutcome::Missing => return Err(RideError::NotFound),
        AssignOutcome::Taken => return Err(RideError::Conflict),
    };
    info!(%ride_id, captain = %captain_id, "ride confirmed");

    let details = super::populate(ride, deps, false).await?;
    let payload = super::event_payload(&details)?;
    deps.gateway
        .send(details.rider.channel, events::RIDE_CONFIRMED, payload)
        .await;

    Ok(details)
}
