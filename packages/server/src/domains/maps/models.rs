use serde::{Deserialize, Serialize};

/// Distance/duration estimate for an (origin, destination) pair.
///
/// `distance_text`/`duration_text` are human-readable renderings carried
/// through to clients unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripEstimate {
    pub distance_m: u32,
    pub duration_s: u32,
    pub distance_text: String,
    pub duration_text: String,
}
