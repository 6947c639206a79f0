mod memory;

pub use memory::MemoryRideStore;
