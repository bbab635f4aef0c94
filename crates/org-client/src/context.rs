//! Client context - dependency container for the views
//!
//! Holds the service, the profile provider, and the client settings.

use std::sync::Arc;

use org_common::{AppError, AppResult, ClientConfig};
use org_core::{Notifier, OrganizationApi, PermissionChecker, PermissionSet, ProfileProvider};
use tracing::info;

use crate::http::{HttpOrganizationApi, RestClient};
use crate::notify::TracingNotifier;
use crate::profile::HttpProfileProvider;
use crate::service::OrganizationService;
use crate::store::OrganizationStore;

/// Client context containing all dependencies
#[derive(Clone)]
pub struct ClientContext {
    config: ClientConfig,
    service: OrganizationService,
    profiles: Arc<dyn ProfileProvider>,
}

impl ClientContext {
    pub fn builder() -> ClientContextBuilder {
        ClientContextBuilder::new()
    }

    /// Wire the HTTP implementations, resolving permissions from the
    /// signed-in user's profile
    pub async fn connect(config: ClientConfig, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        let rest = RestClient::new(config.clone())?;
        let profiles = HttpProfileProvider::new(rest.clone());
        let profile = profiles.current_profile().await?;
        info!(onyen = %profile.onyen(), "Connected to organizations backend");

        Self::builder()
            .config(config)
            .api(Arc::new(HttpOrganizationApi::new(rest)))
            .profiles(Arc::new(profiles))
            .notifier(notifier)
            .permissions(Arc::new(profile.permission_set()))
            .build()
    }

    // === Accessors ===

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn service(&self) -> &OrganizationService {
        &self.service
    }

    pub fn store(&self) -> &OrganizationStore {
        self.service.store()
    }

    pub fn profiles(&self) -> Arc<dyn ProfileProvider> {
        Arc::clone(&self.profiles)
    }

    /// Number of leader checks allowed in flight at once
    pub fn leader_check_concurrency(&self) -> usize {
        self.config.leader_check_concurrency.max(1)
    }
}

/// Builder for creating ClientContext with custom dependencies
#[derive(Default)]
pub struct ClientContextBuilder {
    config: Option<ClientConfig>,
    api: Option<Arc<dyn OrganizationApi>>,
    profiles: Option<Arc<dyn ProfileProvider>>,
    notifier: Option<Arc<dyn Notifier>>,
    permissions: Option<Arc<dyn PermissionChecker>>,
    store: Option<OrganizationStore>,
}

impl ClientContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn api(mut self, api: Arc<dyn OrganizationApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn profiles(mut self, profiles: Arc<dyn ProfileProvider>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn permissions(mut self, permissions: Arc<dyn PermissionChecker>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn store(mut self, store: OrganizationStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the ClientContext
    ///
    /// # Errors
    /// Returns `AppError::Validation` if the api or the profile provider is missing
    pub fn build(self) -> AppResult<ClientContext> {
        let config = self.config.unwrap_or_default();
        let api = self
            .api
            .ok_or_else(|| AppError::validation("api is required"))?;
        let profiles = self
            .profiles
            .ok_or_else(|| AppError::validation("profiles is required"))?;

        let service = OrganizationService::new(
            api,
            self.store.unwrap_or_default(),
            self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier)),
            self.permissions
                .unwrap_or_else(|| Arc::new(PermissionSet::default())),
        )
        .with_notification_duration(config.notification_duration());

        Ok(ClientContext {
            config,
            service,
            profiles,
        })
    }
}
