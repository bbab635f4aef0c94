//! REST implementation of the organization ports
//!
//! `RestClient` owns the shared `reqwest::Client`, the base URL, and the
//! bearer token. Non-2xx responses become `DomainError::Remote` carrying
//! the status and the backend's `detail` message.

use async_trait::async_trait;
use org_common::ClientConfig;
use org_core::{
    ApiResult, Application, DomainError, Organization, OrganizationApi, OrganizationStatus, User,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::paths;

/// Thin wrapper around `reqwest::Client` for the organizations backend
#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl RestClient {
    /// Build a client with the configured request timeout
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| DomainError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.config.endpoint(path));
        match &self.config.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode the JSON body
    pub async fn fetch<T: DeserializeOwned>(&self, method: Method, path: &str) -> ApiResult<T> {
        let response = self.dispatch(self.request(method, path)).await?;
        decode(response).await
    }

    /// Send a JSON body and decode the JSON response
    pub async fn exchange<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.dispatch(self.request(method, path).json(body)).await?;
        decode(response).await
    }

    /// Send a request whose response body is not needed
    pub async fn execute(&self, method: Method, path: &str) -> ApiResult<()> {
        self.dispatch(self.request(method, path)).await.map(drop)
    }

    /// Send a JSON body whose response body is not needed
    pub async fn submit<B>(&self, method: Method, path: &str, body: &B) -> ApiResult<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.dispatch(self.request(method, path).json(body))
            .await
            .map(drop)
    }

    async fn dispatch(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Request to organizations backend failed");
            DomainError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body);
        debug!(status = status.as_u16(), detail = ?detail, "Backend returned an error");
        Err(DomainError::remote(status.as_u16(), detail))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| DomainError::Decode(e.to_string()))
}

/// Extract `detail` from an error body like `{"detail": "..."}`
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// `OrganizationApi` over HTTP
#[derive(Clone)]
pub struct HttpOrganizationApi {
    rest: RestClient,
}

impl HttpOrganizationApi {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    pub fn from_config(config: ClientConfig) -> ApiResult<Self> {
        Ok(Self::new(RestClient::new(config)?))
    }
}

#[async_trait]
impl OrganizationApi for HttpOrganizationApi {
    #[instrument(skip(self))]
    async fn list_organizations(&self) -> ApiResult<Vec<Organization>> {
        self.rest.fetch(Method::GET, paths::ORGANIZATIONS).await
    }

    #[instrument(skip(self))]
    async fn get_organization(&self, slug: &str) -> ApiResult<Organization> {
        self.rest.fetch(Method::GET, &paths::organization(slug)).await
    }

    #[instrument(skip(self, organization), fields(slug = %organization.slug))]
    async fn create_organization(&self, organization: &Organization) -> ApiResult<Organization> {
        self.rest
            .exchange(Method::POST, paths::ORGANIZATIONS, organization)
            .await
    }

    #[instrument(skip(self, organization), fields(slug = %organization.slug))]
    async fn update_organization(&self, organization: &Organization) -> ApiResult<Organization> {
        self.rest
            .exchange(Method::PUT, &paths::organization(&organization.slug), organization)
            .await
    }

    #[instrument(skip(self))]
    async fn delete_organization(&self, slug: &str) -> ApiResult<Organization> {
        self.rest
            .fetch(Method::DELETE, &paths::organization(slug))
            .await
    }

    #[instrument(skip(self))]
    async fn add_member(&self, slug: &str, onyen: &str) -> ApiResult<()> {
        self.rest
            .execute(Method::POST, &paths::add_membership(slug, onyen))
            .await
    }

    #[instrument(skip(self))]
    async fn remove_member(&self, slug: &str, onyen: &str) -> ApiResult<()> {
        self.rest
            .execute(Method::DELETE, &paths::remove_membership(slug, onyen))
            .await
    }

    #[instrument(skip(self))]
    async fn get_members(&self, slug: &str) -> ApiResult<Vec<User>> {
        self.rest.fetch(Method::GET, &paths::members(slug)).await
    }

    #[instrument(skip(self))]
    async fn check_leader_status(&self, slug: &str, onyen: &str) -> ApiResult<bool> {
        self.rest
            .fetch(Method::GET, &paths::authleader(slug, onyen))
            .await
    }

    #[instrument(skip(self))]
    async fn get_status(&self, slug: &str) -> ApiResult<OrganizationStatus> {
        self.rest.fetch(Method::GET, &paths::status(slug)).await
    }

    #[instrument(skip(self, application), fields(organization_id = application.organization_id))]
    async fn submit_application(&self, application: &Application) -> ApiResult<()> {
        self.rest
            .submit(Method::POST, paths::APPLICATIONS, application)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_string() {
        assert_eq!(
            error_detail(r#"{"detail": "Slug already in use"}"#),
            Some("Slug already in use".to_string())
        );
    }

    #[test]
    fn test_error_detail_structured() {
        let detail = error_detail(r#"{"detail": [{"loc": ["body", "name"]}]}"#);
        assert!(detail.is_some_and(|d| d.contains("loc")));
    }

    #[test]
    fn test_error_detail_missing() {
        assert_eq!(error_detail(""), None);
        assert_eq!(error_detail("Internal Server Error"), None);
        assert_eq!(error_detail(r#"{"message": "nope"}"#), None);
        assert_eq!(error_detail(r#"{"detail": null}"#), None);
    }

    #[test]
    fn test_client_from_config() {
        let config = ClientConfig::with_base_url("http://localhost:9999/");
        let rest = RestClient::new(config).unwrap();
        assert_eq!(
            rest.config().endpoint(paths::ORGANIZATIONS),
            "http://localhost:9999/api/organizations"
        );
    }
}
