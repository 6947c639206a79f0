//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container passed to all
//! lifecycle operations. External services sit behind trait abstractions
//! so tests can swap them out.

use std::sync::Arc;

use crate::config::Config;
use crate::domains::captains::data::MemoryCaptainDirectory;
use crate::domains::captains::CaptainLocator;
use crate::domains::maps::MapsService;
use crate::domains::pricing::RateTable;
use crate::domains::realtime::EventGateway;
use crate::domains::riders::data::MemoryRiderDirectory;
use crate::domains::rides::data::MemoryRideStore;
use crate::kernel::{BaseCaptainDirectory, BaseMapsService, BaseRideStore, BaseRiderDirectory};

/// Dependencies accessible to domain actions.
#[derive(Clone)]
pub struct ServerDeps {
    pub rides: Arc<dyn BaseRideStore>,
    pub riders: Arc<dyn BaseRiderDirectory>,
    pub captains: Arc<dyn BaseCaptainDirectory>,
    pub maps: Arc<dyn BaseMapsService>,
    /// Realtime registry; the sole writer of channel/availability fields.
    pub gateway: EventGateway,
    pub locator: CaptainLocator,
    pub rates: RateTable,
    pub dispatch_radius_km: f64,
}

impl ServerDeps {
    pub fn new(
        rides: Arc<dyn BaseRideStore>,
        riders: Arc<dyn BaseRiderDirectory>,
        captains: Arc<dyn BaseCaptainDirectory>,
        maps: Arc<dyn BaseMapsService>,
        rates: RateTable,
        dispatch_radius_km: f64,
    ) -> Self {
        let gateway = EventGateway::new(riders.clone(), captains.clone());
        let locator = CaptainLocator::new(captains.clone());
        Self {
            rides,
            riders,
            captains,
            maps,
            gateway,
            locator,
            rates,
            dispatch_radius_km,
        }
    }

    /// Process-local wiring: in-memory stores plus the configured maps
    /// provider (or the synthetic fallback when no key is set).
    pub fn in_memory(config: &Config) -> Self {
        Self::new(
            Arc::new(MemoryRideStore::new()),
            Arc::new(MemoryRiderDirectory::new()),
            Arc::new(MemoryCaptainDirectory::new()),
            Arc::new(MapsService::new(config.google_maps_api_key.clone())),
            RateTable::default(),
            config.dispatch_radius_km,
        )
    }

    /// Wiring with no upstream provider at all; used by tests and by
    /// development environments without credentials.
    pub fn in_memory_offline(dispatch_radius_km: f64) -> Self {
        Self::new(
            Arc::new(MemoryRideStore::new()),
            Arc::new(MemoryRiderDirectory::new()),
            Arc::new(MemoryCaptainDirectory::new()),
            Arc::new(MapsService::offline()),
            RateTable::default(),
            dispatch_radius_km,
        )
    }
}
