//! Real-time event gateway.
//!
//! Owns the entity -> connection-channel registry and delivers named
//! events to a single channel at a time, at most once. Constructed
//! explicitly and passed by handle; there is no process-global registry.

pub mod events;
mod gateway;

pub use events::{EntityKind, Envelope, InboundMessage, LocationPayload};
pub use gateway::EventGateway;
