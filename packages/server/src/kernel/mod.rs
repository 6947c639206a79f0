pub mod deps;
pub mod telemetry;
pub mod traits;

pub use deps::ServerDeps;
pub use traits::{
    AssignOutcome, BaseCaptainDirectory, BaseMapsService, BaseRideStore, BaseRiderDirectory,
    TransitionOutcome,
};
