//! Integration test utilities for the TypeSense server
//!
//! Spawns the full HTTP stack on the in-memory backend and drives it with a
//! real HTTP client.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
