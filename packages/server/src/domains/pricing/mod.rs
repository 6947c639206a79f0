//! Fare engine.
//!
//! Pure pricing: `(distance, duration, time-of-day)` in, per-class quotes
//! out. No I/O, no hidden state; rates are data (see [`RateTable`]).

mod rates;

pub use rates::{RateCard, RateTable, VehicleClass};

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Surge multiplier for a given hour of day. Bucket bounds are inclusive:
/// morning commute 8-10 and evening commute 17-20 surge at 1.3, the late
/// night window 22-5 at 1.2, everything else is flat.
pub fn surge_multiplier(hour: u32) -> f64 {
    match hour {
        8..=10 | 17..=20 => 1.3,
        22..=23 | 0..=5 => 1.2,
        _ => 1.0,
    }
}

/// Itemized fare for one vehicle class.
#[derive(Debug, Clone, Serialize)]
pub struct FareBreakdown {
    pub base_fare: i64,
    pub distance_fare: i64,
    pub time_fare: i64,
    pub surge_multiplier: f64,
    pub total: i64,
}

/// Per-class quote for a trip, with breakdowns for transparency.
#[derive(Debug, Clone, Serialize)]
pub struct FareQuote {
    pub fares: HashMap<VehicleClass, i64>,
    pub breakdown: HashMap<VehicleClass, FareBreakdown>,
    pub surge: bool,
}

impl FareQuote {
    /// Fare for a single class, if that class is priced.
    pub fn fare(&self, class: VehicleClass) -> Option<i64> {
        self.fares.get(&class).copied()
    }
}

/// Price a trip for every vehicle class in the rate table.
///
/// `fare = max(round((base + per_km * km + per_minute * min) * surge), minimum_fare)`
pub fn quote(distance_m: u32, duration_s: u32, now: DateTime<Utc>, rates: &RateTable) -> FareQuote {
    let distance_km = f64::from(distance_m) / 1000.0;
    let duration_min = f64::from(duration_s) / 60.0;
    let surge = surge_multiplier(now.hour());

    let mut fares = HashMap::new();
    let mut breakdown = HashMap::new();

    for (class, card) in rates.iter() {
        let subtotal = card.base + distance_km * card.per_km + duration_min * card.per_minute;
        let total = ((subtotal * surge).round() as i64).max(card.minimum_fare);

        fares.insert(class, total);
        breakdown.insert(
            class,
            FareBreakdown {
                base_fare: card.base.round() as i64,
                distance_fare: (distance_km * card.per_km).round() as i64,
                time_fare: (duration_min * card.per_minute).round() as i64,
                surge_multiplier: surge,
                total,
            },
        );
    }

    FareQuote {
        fares,
        breakdown,
        surge: surge > 1.0,
    }
}
