//! Geocoding & distance adapter.
//!
//! Resolves addresses to coordinates and trips to distance/duration
//! estimates through the upstream provider, degrading silently to
//! deterministic synthetic answers when the provider is unreachable or
//! unconfigured. Callers never see provider failures.

mod fallback;
mod provider;
mod service;

pub mod models;

pub use provider::{GoogleMapsClient, UpstreamDegraded};
pub use service::MapsService;
