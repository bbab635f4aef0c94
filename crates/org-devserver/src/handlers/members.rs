//! Membership handlers

use axum::{
    extract::{Path, State},
    Json,
};
use org_core::User;

use crate::extractors::CurrentUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Roster of an organization
///
/// GET /api/organizations/:slug/members
pub async fn get_members(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.directory().members(&user, &slug)?))
}

/// Add a user to an organization
///
/// POST /api/organizations/:slug/add_membership/:onyen
pub async fn add_membership(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((slug, onyen)): Path<(String, String)>,
) -> ApiResult<Json<bool>> {
    state.directory().add_membership(&user, &slug, &onyen)?;
    Ok(Json(true))
}

/// Remove a user from an organization
///
/// DELETE /api/organizations/:slug/remove_membership/:onyen
pub async fn remove_membership(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((slug, onyen)): Path<(String, String)>,
) -> ApiResult<Json<bool>> {
    state.directory().remove_membership(&user, &slug, &onyen)?;
    Ok(Json(true))
}
