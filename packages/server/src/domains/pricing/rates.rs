//! Per-vehicle-class rate configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported vehicle classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Car,
    Auto,
    Moto,
}

impl VehicleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Car => "car",
            VehicleClass::Auto => "auto",
            VehicleClass::Moto => "moto",
        }
    }

    /// Parse the wire representation used by clients.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "car" => Some(VehicleClass::Car),
            "auto" => Some(VehicleClass::Auto),
            "moto" => Some(VehicleClass::Moto),
            _ => None,
        }
    }
}

/// Pricing constants for one vehicle class. Amounts are in whole currency
/// units; `per_minute` covers waiting/traffic time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateCard {
    pub base: f64,
    pub per_km: f64,
    pub per_minute: f64,
    pub minimum_fare: i64,
}

/// Keyed rate configuration: class -> rate card. Adding a vehicle class is
/// a table entry, not an algorithm change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable(HashMap<VehicleClass, RateCard>);

impl RateTable {
    pub fn get(&self, class: VehicleClass) -> Option<&RateCard> {
        self.0.get(&class)
    }

    pub fn insert(&mut self, class: VehicleClass, card: RateCard) {
        self.0.insert(class, card);
    }

    pub fn iter(&self) -> impl Iterator<Item = (VehicleClass, &RateCard)> {
        self.0.iter().map(|(class, card)| (*class, card))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        let mut table = HashMap::new();
        table.insert(
            VehicleClass::Auto,
            RateCard {
                base: 25.0,
                per_km: 12.0,
                per_minute: 1.8,
                minimum_fare: 40,
            },
        );
        table.insert(
            VehicleClass::Car,
            RateCard {
                base: 65.0,
                per_km: 18.0,
                per_minute: 2.5,
                minimum_fare: 80,
            },
        );
        table.insert(
            VehicleClass::Moto,
            RateCard {
                base: 15.0,
                per_km: 9.0,
                per_minute: 1.2,
                minimum_fare: 25,
            },
        );
        Self(table)
    }
}
