//! Captain earnings summary over completed rides.

use serde::Serialize;
use uuid::Uuid;

use crate::domains::rides::errors::RideError;
use crate::kernel::{BaseRideStore, ServerDeps};

#[derive(Debug, Clone, Serialize)]
pub struct CaptainStats {
    pub total_earnings: i64,
    pub total_trips: u64,
    /// Derived from ride durations; a lower bound on time driven.
    pub hours_online: f64,
}

pub async fn captain_stats(captain_id: Uuid, deps: &ServerDeps) -> Result<CaptainStats, RideError> {
    let completed = deps.rides.find_completed_by_captain(captain_id).await?;

    let total_earnings = completed.iter().map(|ride| ride.fare).sum();
    let total_trips = completed.len() as u64;
    let seconds: u64 = completed.iter().map(|ride| u64::from(ride.duration_s)).sum();

    Ok(CaptainStats {
        total_earnings,
        total_trips,
        hours_online: seconds as f64 / 3600.0,
    })
}
