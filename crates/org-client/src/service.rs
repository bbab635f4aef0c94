//! Organization service
//!
//! Wraps an `OrganizationApi` with store mutation and user-facing
//! notifications. Every operation returns the underlying result so callers
//! can branch; notification wording is fixed here.

use std::sync::Arc;
use std::time::Duration;

use org_core::{
    ApiResult, Application, DomainError, Notification, Notifier, Organization, OrganizationApi,
    OrganizationStatus, PermissionChecker, User,
};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::store::OrganizationStore;

const REMOVE_MEMBER_FAILED: &str = "Error removing member: you might input an invalid onyen \
     or the user is not a member of this organization";

/// Service the views talk to
#[derive(Clone)]
pub struct OrganizationService {
    api: Arc<dyn OrganizationApi>,
    store: OrganizationStore,
    notifier: Arc<dyn Notifier>,
    permissions: Arc<dyn PermissionChecker>,
    notification_duration: Duration,
}

impl OrganizationService {
    pub fn new(
        api: Arc<dyn OrganizationApi>,
        store: OrganizationStore,
        notifier: Arc<dyn Notifier>,
        permissions: Arc<dyn PermissionChecker>,
    ) -> Self {
        Self {
            api,
            store,
            notifier,
            permissions,
            notification_duration: Notification::DEFAULT_DURATION,
        }
    }

    /// Override how long notifications stay visible
    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }

    pub fn store(&self) -> &OrganizationStore {
        &self.store
    }

    pub fn permissions(&self) -> &dyn PermissionChecker {
        self.permissions.as_ref()
    }

    // === Notifications ===

    pub fn notify_info(&self, message: impl Into<String>) {
        self.notifier
            .notify(Notification::info(message).with_duration(self.notification_duration));
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.notifier
            .notify(Notification::error(message).with_duration(self.notification_duration));
    }

    // === Directory ===

    /// Fetch every organization and replace the store contents
    #[instrument(skip(self))]
    pub async fn list_organizations(&self) -> ApiResult<Vec<Organization>> {
        let organizations = self.api.list_organizations().await?;
        info!(count = organizations.len(), "Organization directory refreshed");
        self.store.replace_all(organizations.clone());
        Ok(organizations)
    }

    #[instrument(skip(self))]
    pub async fn get_organization(&self, slug: &str) -> ApiResult<Organization> {
        self.api.get_organization(slug).await
    }

    /// Organizations the current user administers
    pub fn admin_organizations(&self) -> Vec<Organization> {
        self.store.admin_organizations(self.permissions.as_ref())
    }

    #[instrument(skip(self, organization), fields(slug = %organization.slug))]
    pub async fn create_organization(
        &self,
        organization: &Organization,
    ) -> ApiResult<Organization> {
        organization.validate().map_err(DomainError::from)?;
        let created = self.api.create_organization(organization).await?;
        info!(id = ?created.id, "Organization created");
        self.store.append(created.clone());
        Ok(created)
    }

    #[instrument(skip(self, organization), fields(slug = %organization.slug))]
    pub async fn update_organization(
        &self,
        organization: &Organization,
    ) -> ApiResult<Organization> {
        organization.validate().map_err(DomainError::from)?;
        let updated = self.api.update_organization(organization).await?;
        info!(id = ?updated.id, "Organization updated");
        self.store.upsert(updated.clone());
        Ok(updated)
    }

    /// Delete by slug, then drop the deleted organization from the store
    #[instrument(skip(self, organization), fields(slug = %organization.slug))]
    pub async fn delete_organization(&self, organization: &Organization) -> ApiResult<()> {
        let deleted = self.api.delete_organization(&organization.slug).await?;
        match deleted.id {
            Some(id) => self.store.remove(id),
            None => self.store.remove_slug(&deleted.slug),
        }
        info!(id = ?deleted.id, "Organization deleted");
        Ok(())
    }

    // === Membership ===

    #[instrument(skip(self))]
    pub async fn add_member(&self, slug: &str, onyen: &str) -> ApiResult<()> {
        match self.api.add_member(slug, onyen).await {
            Ok(()) => {
                info!("Member added to organization");
                self.notify_info(format!("Successfully added {onyen} to organization"));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to add member");
                self.notify_error("Error adding member: you might input an invalid onyen");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_member(&self, slug: &str, onyen: &str) -> ApiResult<()> {
        match self.api.remove_member(slug, onyen).await {
            Ok(()) => {
                info!("Member removed from organization");
                self.notify_info(format!("Successfully removed {onyen} from organization"));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to remove member");
                self.notify_error(REMOVE_MEMBER_FAILED);
                Err(e)
            }
        }
    }

    /// Roster of an organization
    ///
    /// 403 and 404 mean the caller cannot see the roster and are returned
    /// without a notification.
    #[instrument(skip(self))]
    pub async fn get_organization_members(&self, slug: &str) -> ApiResult<Vec<User>> {
        self.api.get_members(slug).await.inspect_err(|e| {
            if !e.is_expected_absence() {
                warn!(error = %e, "Failed to fetch organization members");
                self.notify_error("Error fetching organization members.");
            }
        })
    }

    #[instrument(skip(self))]
    pub async fn check_leader_status(&self, slug: &str, onyen: &str) -> ApiResult<bool> {
        self.api
            .check_leader_status(slug, onyen)
            .await
            .inspect_err(|e| {
                warn!(error = %e, "Failed to check leader status");
                self.notify_error("Error checking leader status.");
            })
    }

    #[instrument(skip(self))]
    pub async fn get_organization_status(&self, slug: &str) -> ApiResult<OrganizationStatus> {
        self.api.get_status(slug).await.inspect_err(|e| {
            warn!(error = %e, "Failed to fetch organization status");
            self.notify_error("Error fetching organization status.");
        })
    }

    // === Applications ===

    #[instrument(skip(self, application), fields(organization_id = application.organization_id))]
    pub async fn submit_application(&self, application: &Application) -> ApiResult<()> {
        application.validate()?;
        self.api.submit_application(application).await?;
        info!("Application submitted");
        Ok(())
    }
}
