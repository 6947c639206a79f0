// Ridelink - Dispatch Core
//
// This crate provides the backend core for matching ride requesters with
// nearby captains, pricing trips, and driving rides through a verified
// lifecycle with real-time notifications to both parties.
// Architecture follows domain-driven design; HTTP routing, account
// management and the concrete storage engine live behind trait seams.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
