//! Rider records (consumed interface).
//!
//! Account management owns rider identity; the dispatch core only needs
//! the identity and, while connected, the realtime channel binding.

pub mod data;
pub mod models;
