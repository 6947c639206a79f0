//! Deterministic synthetic estimates.
//!
//! Used whenever the upstream provider cannot answer. Every function here
//! is a pure function of its string inputs, so a ride priced during a
//! provider outage reprices identically afterwards.

use crate::common::geo::Coordinates;
use crate::domains::maps::models::TripEstimate;

/// Assumed city traffic speed for synthetic durations.
const AVERAGE_SPEED_KMH: f64 = 22.0;

/// Landmarks served as autocomplete suggestions when the places API is
/// unavailable.
const LANDMARKS: [&str; 12] = [
    "Connaught Place, New Delhi, India",
    "India Gate, New Delhi, India",
    "Red Fort, New Delhi, India",
    "Qutub Minar, New Delhi, India",
    "Lotus Temple, New Delhi, India",
    "Chandni Chowk, New Delhi, India",
    "Karol Bagh, New Delhi, India",
    "Nehru Place, New Delhi, India",
    "New Delhi Railway Station, New Delhi, India",
    "IGI Airport, New Delhi, India",
    "Gurgaon Sector 14, Haryana, India",
    "Noida Sector 18, Uttar Pradesh, India",
];

/// 32-bit string hash over UTF-16 code units: `h = (h << 5) - h + unit`,
/// wrapping, absolute value. The seed for every synthetic answer.
fn string_hash(input: &str) -> i64 {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    i64::from(hash).abs()
}

/// Synthetic trip estimate: 1.5-25 km, duration from average city speed
/// with a 10-40% traffic allowance, rounded to whole minutes.
pub(crate) fn synthetic_trip(origin: &str, destination: &str) -> TripEstimate {
    let seed = string_hash(&format!("{origin}{destination}"));

    let distance_m = 1_500 + (seed % 23_500) as u32;
    let distance_km = f64::from(distance_m) / 1000.0;

    let base_minutes = distance_km / AVERAGE_SPEED_KMH * 60.0;
    let traffic_multiplier = 1.1 + (seed % 30) as f64 / 100.0;
    let minutes = (base_minutes * traffic_multiplier).round() as u32;

    TripEstimate {
        distance_m,
        duration_s: minutes * 60,
        distance_text: format!("{distance_km:.1} km"),
        duration_text: format!("{minutes} mins"),
    }
}

/// Synthetic geocode: a stable point inside the metro bounding box.
pub(crate) fn synthetic_coordinates(address: &str) -> Coordinates {
    let seed = string_hash(address);
    Coordinates {
        lat: 28.40 + (seed % 4_000) as f64 / 10_000.0,
        lng: 76.90 + ((seed / 4_000) % 5_000) as f64 / 10_000.0,
    }
}

/// Synthetic autocomplete: landmarks matching the input, capped at five;
/// the first five landmarks when nothing matches.
pub(crate) fn synthetic_suggestions(input: &str) -> Vec<String> {
    let needle = input.to_lowercase();
    let matched: Vec<String> = LANDMARKS
        .iter()
        .filter(|landmark| landmark.to_lowercase().contains(&needle))
        .take(5)
        .map(|landmark| (*landmark).to_string())
        .collect();

    if matched.is_empty() {
        LANDMARKS
            .iter()
            .take(5)
            .map(|landmark| (*landmark).to_string())
            .collect()
    } else {
        matched
    }
}
