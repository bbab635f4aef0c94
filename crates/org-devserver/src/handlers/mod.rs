//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod applications;
pub mod health;
pub mod members;
pub mod organizations;
pub mod profile;
