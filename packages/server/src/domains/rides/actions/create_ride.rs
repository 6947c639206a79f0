//! Create ride action - pricing, OTP issue, persistence.

use chrono::Utc;
use rand::rngs::OsRng;
use rand::Rng;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::domains::pricing::{self, VehicleClass};
use crate::domains::rides::dispatch::spawn_new_ride_broadcast;
use crate::domains::rides::errors::RideError;
use crate::domains::rides::models::{Ride, RideDetails, RideStatus};
use crate::kernel::{BaseMapsService, BaseRideStore, BaseRiderDirectory, ServerDeps};

/// 6-digit OTP from the OS random source.
fn generate_otp() -> String {
    OsRng.gen_range(100_000..1_000_000).to_string()
}

/// Price and persist a new ride in the requested state.
///
/// Returns the populated ride including the OTP - the creator's one-time
/// disclosure. Captain discovery and broadcast are a separate concern;
/// callers wanting the canonical respond-then-broadcast flow use
/// [`create_and_dispatch`].
pub async fn create_ride(
    rider_id: Uuid,
    pickup: &str,
    destination: &str,
    vehicle: VehicleClass,
    deps: &ServerDeps,
) -> Result<RideDetails, RideError> {
    if pickup.trim().is_empty() {
        return Err(RideError::Validation("pickup"));
    }
    if destination.trim().is_empty() {
        return Err(RideError::Validation("destination"));
    }
    if deps.riders.find_by_id(rider_id).await?.is_none() {
        return Err(RideError::Validation("rider"));
    }

    let estimate = deps.maps.resolve_trip(pickup, destination).await;
    let quote = pricing::quote(estimate.distance_m, estimate.duration_s, Utc::now(), &deps.rates);
    let fare = quote
        .fare(vehicle)
        .ok_or(RideError::Validation("vehicleClass"))?;

    let now = Utc::now();
    let ride = Ride {
        id: Uuid::new_v4(),
        rider: rider_id,
        captain: None,
        pickup: pickup.to_string(),
        destination: destination.to_string(),
        vehicle,
        status: RideStatus::Requested,
        otp: generate_otp(),
        fare,
        distance_m: estimate.distance_m,
        duration_s: estimate.duration_s,
        created_at: now,
        updated_at: now,
    };

    let ride = deps.rides.insert(ride).await?;
    info!(ride_id = %ride.id, rider = %rider_id, fare, "ride created");

    super::populate(ride, deps, true).await
}

/// Create a ride and kick off captain discovery in one call.
///
/// The ride is committed and its details ready for the caller before the
/// broadcast task starts; discovery runs behind the returned handle and
/// sees eventual captain-location state.
pub async fn create_and_dispatch(
    rider_id: Uuid,
    pickup: &str,
    destination: &str,
    vehicle: VehicleClass,
    deps: &ServerDeps,
) -> Result<(RideDetails, JoinHandle<()>), RideError> {
    let details = create_ride(rider_id, pickup, destination, vehicle, deps).await?;
    let handle = spawn_new_ride_broadcast(deps.clone(), details.clone());
    Ok((details, handle))
}
