//! Read-only ride queries: fare estimation and address suggestions.

use chrono::Utc;
use serde::Serialize;

use crate::domains::pricing::{self, FareQuote};
use crate::domains::rides::errors::RideError;
use crate::kernel::{BaseMapsService, ServerDeps};

/// Fare quote plus the human-readable trip rendering.
#[derive(Debug, Clone, Serialize)]
pub struct FareResponse {
    #[serde(flatten)]
    pub quote: FareQuote,
    pub distance: String,
    pub duration: String,
}

/// Price a prospective trip for every vehicle class.
pub async fn get_fare(
    pickup: &str,
    destination: &str,
    deps: &ServerDeps,
) -> Result<FareResponse, RideError> {
    if pickup.trim().is_empty() {
        return Err(RideError::Validation("pickup"));
    }
    if destination.trim().is_empty() {
        return Err(RideError::Validation("destination"));
    }

    let estimate = deps.maps.resolve_trip(pickup, destination).await;
    let quote = pricing::quote(estimate.distance_m, estimate.duration_s, Utc::now(), &deps.rates);

    Ok(FareResponse {
        quote,
        distance: estimate.distance_text,
        duration: estimate.duration_text,
    })
}

/// Ordered address suggestions for a partial input.
pub async fn get_suggestions(input: &str, deps: &ServerDeps) -> Result<Vec<String>, RideError> {
    if input.trim().is_empty() {
        return Err(RideError::Validation("input"));
    }
    Ok(deps.maps.suggest(input).await)
}
