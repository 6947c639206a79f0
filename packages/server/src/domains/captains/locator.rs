//! Radius search over connected captains.

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::common::geo::{haversine_km, Coordinates};
use crate::domains::captains::models::Captain;
use crate::kernel::BaseCaptainDirectory;

/// What to do with connected captains that have never reported a
/// location. The observed production behavior is to include them
/// ("assume nearby"); `Exclude` is the strict alternative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnlocatedPolicy {
    #[default]
    Include,
    Exclude,
}

/// Geospatial candidate search over the captain directory.
#[derive(Clone)]
pub struct CaptainLocator {
    directory: Arc<dyn BaseCaptainDirectory>,
    policy: UnlocatedPolicy,
}

impl CaptainLocator {
    pub fn new(directory: Arc<dyn BaseCaptainDirectory>) -> Self {
        Self {
            directory,
            policy: UnlocatedPolicy::default(),
        }
    }

    pub fn with_policy(directory: Arc<dyn BaseCaptainDirectory>, policy: UnlocatedPolicy) -> Self {
        Self { directory, policy }
    }

    /// Every connected captain within `radius_km` of `point`. Captains
    /// without a location are governed by the configured policy. No
    /// ordering guarantee.
    pub async fn find_near(&self, point: Coordinates, radius_km: f64) -> Result<Vec<Captain>> {
        let connected = self.directory.find_connected().await?;
        let candidates = connected.len();

        let eligible: Vec<Captain> = connected
            .into_iter()
            .filter(|captain| match captain.location {
                Some(location) => haversine_km(point, location) <= radius_km,
                None => self.policy == UnlocatedPolicy::Include,
            })
            .collect();

        debug!(
            candidates,
            eligible = eligible.len(),
            radius_km,
            "radius search complete"
        );
        Ok(eligible)
    }
}
