//! Organization handlers
//!
//! Listing, lookup, and CRUD for organizations, plus the public status and
//! leader checks.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use org_core::{Organization, OrganizationStatus};

use crate::extractors::{CurrentUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// List every organization
///
/// GET /api/organizations
pub async fn list_organizations(State(state): State<AppState>) -> Json<Vec<Organization>> {
    Json(state.directory().list())
}

/// Create an organization
///
/// POST /api/organizations
pub async fn create_organization(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(organization): ValidatedJson<Organization>,
) -> ApiResult<(StatusCode, Json<Organization>)> {
    let created = state.directory().create(&user, organization)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get organization by slug
///
/// GET /api/organizations/:slug
pub async fn get_organization(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Organization>> {
    Ok(Json(state.directory().get(&slug)?))
}

/// Update the organization identified by the body's id
///
/// PUT /api/organizations/:slug
pub async fn update_organization(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
    ValidatedJson(organization): ValidatedJson<Organization>,
) -> ApiResult<Json<Organization>> {
    let updated = state.directory().update(&user, &slug, organization)?;
    Ok(Json(updated))
}

/// Delete an organization, returning it
///
/// DELETE /api/organizations/:slug
pub async fn delete_organization(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<Organization>> {
    Ok(Json(state.directory().delete(&user, &slug)?))
}

/// Join policy of an organization
///
/// GET /api/organizations/:slug/status
pub async fn get_status(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<OrganizationStatus>> {
    Ok(Json(state.directory().status(&slug)?))
}

/// Whether a user leads an organization
///
/// GET /api/organizations/:slug/:onyen/authleader
pub async fn check_leader(
    State(state): State<AppState>,
    Path((slug, onyen)): Path<(String, String)>,
) -> ApiResult<Json<bool>> {
    Ok(Json(state.directory().is_leader(&slug, &onyen)?))
}
