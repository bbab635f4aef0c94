//! Profile provider backed by `GET /api/profile`

use async_trait::async_trait;
use org_core::{ApiResult, Profile, ProfileProvider};
use reqwest::Method;
use tracing::instrument;

use crate::http::RestClient;
use crate::paths;

/// Fetches the signed-in user's profile for the configured token
#[derive(Clone)]
pub struct HttpProfileProvider {
    rest: RestClient,
}

impl HttpProfileProvider {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl ProfileProvider for HttpProfileProvider {
    #[instrument(skip(self))]
    async fn current_profile(&self) -> ApiResult<Profile> {
        self.rest.fetch(Method::GET, paths::PROFILE).await
    }
}
