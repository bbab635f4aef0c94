//! Integration test utilities for the organization directory
//!
//! Spawns the development backend on an ephemeral port and wires real
//! HTTP clients and view models against it.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
