//! Post-create captain discovery and broadcast.
//!
//! Ride creation answers its caller first; discovery runs afterwards in
//! an explicit spawned task. Discovery therefore sees eventual, not
//! snapshot, captain-location state, and any delivery failure is logged
//! rather than propagated - a notification can never fail a ride.

use anyhow::Result;
use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domains::realtime::events;
use crate::domains::rides::models::RideDetails;
use crate::kernel::{BaseMapsService, ServerDeps};

/// Spawn the new-ride broadcast for a freshly created ride. The handle
/// is returned so callers can await or supervise the dispatch; ordering
/// is per ride only.
pub fn spawn_new_ride_broadcast(deps: ServerDeps, details: RideDetails) -> JoinHandle<()> {
    tokio::spawn(async move {
        let ride_id = details.id;
        if let Err(e) = broadcast_new_ride(&deps, details).await {
            warn!(%ride_id, error = %e, "new-ride broadcast failed");
        }
    })
}

async fn broadcast_new_ride(deps: &ServerDeps, details: RideDetails) -> Result<()> {
    let pickup = deps.maps.resolve_address(&details.pickup).await;
    let eligible = deps.locator.find_near(pickup, deps.dispatch_radius_km).await?;

    let payload = serde_json::to_value(details.clone().redacted())?;
    info!(
        ride_id = %details.id,
        captains = eligible.len(),
        radius_km = deps.dispatch_radius_km,
        "broadcasting new ride"
    );

    let sends = eligible
        .iter()
        .map(|captain| deps.gateway.send(captain.channel, events::NEW_RIDE, payload.clone()));
    join_all(sends).await;

    Ok(())
}
