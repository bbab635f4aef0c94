//! # org-devserver
//!
//! In-memory organizations backend built with Axum. Serves the same REST
//! surface the client consumes, seeded with demo users and organizations.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod seed;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server, serve};
pub use state::{AppState, Directory};
