//! Join application handlers

use axum::{extract::State, http::StatusCode, Json};
use org_core::Application;

use crate::extractors::CurrentUser;
use crate::response::ApiResult;
use crate::state::{AppState, StoredApplication};

/// Submit an application to join an organization
///
/// POST /api/organizations/applications
pub async fn submit_application(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(application): Json<Application>,
) -> ApiResult<(StatusCode, Json<StoredApplication>)> {
    let stored = state.directory().submit_application(application)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Every received application
///
/// GET /api/organizations/applications
pub async fn list_applications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<StoredApplication>>> {
    Ok(Json(state.directory().applications(&user)?))
}
