//! Ride lifecycle.
//!
//! Owns every ride state transition: creation and pricing, conditional
//! captain assignment, OTP-verified start, captain-authorized completion,
//! and the post-create captain broadcast.

pub mod actions;
pub mod data;
pub mod dispatch;
pub mod errors;
pub mod models;

pub use errors::RideError;
pub use models::{Ride, RideDetails, RideStatus};
