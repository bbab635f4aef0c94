//! Route definitions
//!
//! Mirrors the REST surface the organization client calls.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{applications, health, members, organizations, profile};
use crate::state::AppState;

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .merge(health_routes())
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(organization_routes())
        .merge(membership_routes())
        .route("/profile", get(profile::get_profile))
}

fn organization_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/organizations",
            get(organizations::list_organizations).post(organizations::create_organization),
        )
        .route(
            "/organizations/applications",
            get(applications::list_applications).post(applications::submit_application),
        )
        .route(
            "/organizations/:slug",
            get(organizations::get_organization)
                .put(organizations::update_organization)
                .delete(organizations::delete_organization),
        )
        .route("/organizations/:slug/status", get(organizations::get_status))
        .route(
            "/organizations/:slug/:onyen/authleader",
            get(organizations::check_leader),
        )
}

fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/:slug/members", get(members::get_members))
        .route(
            "/organizations/:slug/add_membership/:onyen",
            post(members::add_membership),
        )
        .route(
            "/organizations/:slug/remove_membership/:onyen",
            delete(members::remove_membership),
        )
}
