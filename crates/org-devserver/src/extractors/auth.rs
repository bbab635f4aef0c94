//! Authentication extractor
//!
//! Resolves the bearer token in the Authorization header to a directory user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use org_common::AppError;
use org_core::User;

use crate::response::ApiError;
use crate::state::AppState;

/// The signed-in user
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let user = app_state.authenticate(bearer.token()).ok_or_else(|| {
            tracing::warn!("Unknown bearer token");
            AppError::InvalidToken
        })?;

        Ok(CurrentUser(user))
    }
}
