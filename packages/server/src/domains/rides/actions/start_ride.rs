//! Start ride action - OTP verification.

use tracing::info;
use uuid::Uuid;

use crate::domains::realtime::events;
use crate::domains::rides::errors::RideError;
use crate::domains::rides::models::{RideDetails, RideStatus};
use crate::kernel::{BaseRideStore, ServerDeps, TransitionOutcome};

/// Verify the OTP and move an accepted ride to ongoing. Failures report
/// the first violated precondition and never mutate status.
pub async fn start_ride(
    ride_id: Uuid,
    otp: &str,
    captain_id: Uuid,
    deps: &ServerDeps,
) -> Result<RideDetails, RideError> {
    if otp.trim().is_empty() {
        return Err(RideError::Validation("otp"));
    }

    let ride = deps
        .rides
        .find_by_id(ride_id)
        .await?
        .ok_or(RideError::NotFound)?;

    if ride.status != RideStatus::Accepted {
        return Err(RideError::InvalidState {
            expected: RideStatus::Accepted,
            actual: ride.status,
        });
    }
    if ride.otp != otp {
        return Err(RideError::OtpMismatch);
    }

    let ride = match deps
        .rides
        .transition(ride_id, RideStatus::Accepted, RideStatus::Ongoing)
        .await?
    {
        TransitionOutcome::Done(ride) => ride,
        TransitionOutcome::Missing => return Err(RideError::NotFound),
        TransitionOutcome::WrongState(actual) => {
            return Err(RideError::InvalidState {
                expected: RideStatus::Accepted,
                actual,
            })
        }
    };
    info!(%ride_id, captain = %captain_id, "ride started");

    let details = super::populate(ride, deps, false).await?;
    let payload = super::event_payload(&details)?;
    deps.gateway
        .send(details.rider.channel, events::RIDE_STARTED, payload)
        .await;

    Ok(details)
}
