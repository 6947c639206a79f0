// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Lifecycle
// rules (like "a ride starts only from accepted") live in domain actions
// that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseRideStore)

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::common::geo::Coordinates;
use crate::domains::captains::models::Captain;
use crate::domains::maps::models::TripEstimate;
use crate::domains::riders::models::Rider;
use crate::domains::rides::models::{Ride, RideStatus};

// =============================================================================
// Maps Service Trait (Infrastructure - geocoding / distance / autocomplete)
// =============================================================================

/// Address and trip resolution. Infallible by contract: implementations
/// degrade to deterministic synthetic answers rather than surfacing
/// provider failures.
#[async_trait]
pub trait BaseMapsService: Send + Sync {
    /// Resolve a free-text address to coordinates.
    async fn resolve_address(&self, address: &str) -> Coordinates;

    /// Resolve an (origin, destination) pair to a distance/duration estimate.
    async fn resolve_trip(&self, origin: &str, destination: &str) -> TripEstimate;

    /// Ordered address suggestions for a partial input.
    async fn suggest(&self, input: &str) -> Vec<String>;
}

// =============================================================================
// Ride Store Trait (Infrastructure - opaque document store)
// =============================================================================

/// Result of the conditional captain assignment.
#[derive(Debug, Clone)]
pub enum AssignOutcome {
    /// Captain attached and status moved to accepted.
    Assigned(Ride),
    /// No ride with that id.
    Missing,
    /// Ride exists but is no longer requested; a concurrent confirm won.
    Taken,
}

/// Result of a guarded status transition.
#[derive(Debug, Clone)]
pub enum TransitionOutcome {
    Done(Ride),
    Missing,
    /// Ride exists but its status is not the expected one.
    WrongState(RideStatus),
}

#[async_trait]
pub trait BaseRideStore: Send + Sync {
    async fn insert(&self, ride: Ride) -> Result<Ride>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ride>>;

    /// Lookup filtered by assigned captain; the miss doubles as an
    /// authorization failure.
    async fn find_for_captain(&self, id: Uuid, captain: Uuid) -> Result<Option<Ride>>;

    async fn find_completed_by_captain(&self, captain: Uuid) -> Result<Vec<Ride>>;

    /// Atomically assign `captain` and move requested -> accepted. The
    /// update applies only while the ride is still requested.
    async fn assign_captain(&self, id: Uuid, captain: Uuid) -> Result<AssignOutcome>;

    /// Atomically move `expected` -> `to`; no-op when the status differs.
    async fn transition(
        &self,
        id: Uuid,
        expected: RideStatus,
        to: RideStatus,
    ) -> Result<TransitionOutcome>;
}

// =============================================================================
// Rider / Captain Directory Traits (owned by account management)
// =============================================================================

#[async_trait]
pub trait BaseRiderDirectory: Send + Sync {
    async fn upsert(&self, rider: Rider) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rider>>;
    async fn set_channel(&self, id: Uuid, channel: Uuid) -> Result<()>;
    /// Clear whichever rider is bound to `channel`; returns the rider id.
    async fn clear_channel(&self, channel: Uuid) -> Result<Option<Uuid>>;
}

#[async_trait]
pub trait BaseCaptainDirectory: Send + Sync {
    async fn upsert(&self, captain: Captain) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Captain>>;
    /// Captains currently holding a live channel.
    async fn find_connected(&self) -> Result<Vec<Captain>>;
    /// Bind a channel and mark the captain active.
    async fn set_channel(&self, id: Uuid, channel: Uuid) -> Result<()>;
    /// Clear whichever captain is bound to `channel` and mark them
    /// inactive; returns the captain id.
    async fn clear_channel(&self, channel: Uuid) -> Result<Option<Uuid>>;
    async fn update_location(&self, id: Uuid, location: Coordinates) -> Result<()>;
}
