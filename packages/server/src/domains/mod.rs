pub mod captains;
pub mod maps;
pub mod pricing;
pub mod realtime;
pub mod riders;
pub mod rides;
