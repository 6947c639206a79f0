//! End ride action - captain-authorized completion.

use tracing::info;
use uuid::Uuid;

use crate::domains::realtime::events;
use crate::domains::rides::errors::RideError;
use crate::domains::rides::models::{RideDetails, RideStatus};
use crate::kernel::{BaseRideStore, ServerDeps, TransitionOutcome};

/// Complete an ongoing ride. The lookup is filtered by the assigned
/// captain, so a foreign captain sees `NotFound` rather than a
/// permission error.
pub async fn end_ride(
    ride_id: Uuid,
    captain_id: Uuid,
    deps: &ServerDeps,
) -> Result<RideDetails, RideError> {
    let ride = deps
        .rides
        .find_for_captain(ride_id, captain_id)
        .await?
        .ok_or(RideError::NotFound)?;

    if ride.status != RideStatus::Ongoing {
        return Err(RideError::InvalidState {
            expected: RideStatus::Ongoing,
            actual: ride.status,
        });
    }

    let ride = match deps
        .rides
        .transition(ride_id, RideStatus::Ongoing, RideStatus::Completed)
        .await?
    {
        TransitionOutcome::Done(ride) => ride,
        TransitionOutcome::Missing => return Err(RideError::NotFound),
        TransitionOutcome::WrongState(actual) => {
            return Err(RideError::InvalidState {
                expected: RideStatus::Ongoing,
                actual,
            })
        }
    };
    info!(%ride_id, captain = %captain_id, "ride completed");

    let details = super::populate(ride, deps, false).await?;
    let payload = super::event_payload(&details)?;
    deps.gateway
        .send(details.rider.channel, events::RIDE_ENDED, payload)
        .await;

    Ok(details)
}
