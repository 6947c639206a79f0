//! Captain records (consumed interface) and geospatial lookup.
//!
//! Account management owns captain identity; this domain only reads
//! captain records for matching. Channel, availability and location
//! fields are written exclusively by the realtime gateway.

pub mod data;
pub mod locator;
pub mod models;

pub use locator::{CaptainLocator, UnlocatedPolicy};
