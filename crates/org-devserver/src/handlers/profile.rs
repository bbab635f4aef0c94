//! Profile handler

use axum::{extract::State, Json};
use org_core::Profile;

use crate::extractors::CurrentUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// The signed-in user with their permission grants
///
/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.directory().profile(&user.onyen)?))
}
