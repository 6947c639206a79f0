use async_trait::async_trait;
use tracing::warn;

use crate::common::geo::Coordinates;
use crate::domains::maps::fallback;
use crate::domains::maps::models::TripEstimate;
use crate::domains::maps::provider::GoogleMapsClient;
use crate::kernel::BaseMapsService;

/// Maps adapter over an optional upstream provider.
///
/// Every operation is infallible from the caller's perspective: when the
/// provider errors or no API key is configured, the deterministic
/// synthetic path answers instead and the degradation is logged.
pub struct MapsService {
    provider: Option<GoogleMapsClient>,
}

impl MapsService {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            provider: api_key.map(GoogleMapsClient::new),
        }
    }

    /// Adapter with no upstream provider; serves synthetic answers only.
    pub fn offline() -> Self {
        Self { provider: None }
    }
}

#[async_trait]
impl BaseMapsService for MapsService {
    async fn resolve_address(&self, address: &str) -> Coordinates {
        if let Some(provider) = &self.provider {
            match provider.geocode(address).await {
                Ok(coordinates) => return coordinates,
                Err(e) => warn!(error = %e, address, "geocoding degraded, using synthetic coordinates"),
            }
        }
        fallback::synthetic_coordinates(address)
    }

    async fn resolve_trip(&self, origin: &str, destination: &str) -> TripEstimate {
        if let Some(provider) = &self.provider {
            match provider.distance_matrix(origin, destination).await {
                Ok(estimate) => return estimate,
                Err(e) => warn!(error = %e, origin, destination, "distance provider degraded, using synthetic estimate"),
            }
        }
        fallback::synthetic_trip(origin, destination)
    }

    async fn suggest(&self, input: &str) -> Vec<String> {
        if let Some(provider) = &self.provider {
            match provider.autocomplete(input).await {
                Ok(suggestions) => return suggestions,
                Err(e) => warn!(error = %e, input, "places provider degraded, using synthetic suggestions"),
            }
        }
        fallback::synthetic_suggestions(input)
    }
}
