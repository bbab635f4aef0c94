//! Ports for the organization feature
//!
//! The views depend on these traits only. `org-client` provides the HTTP
//! implementations; tests provide in-memory ones.

use async_trait::async_trait;

use crate::entities::{Application, Notification, Organization, Profile, User};
use crate::error::DomainError;
use crate::value_objects::OrganizationStatus;

/// Result type for remote operations
pub type ApiResult<T> = Result<T, DomainError>;

// ============================================================================
// Organization API
// ============================================================================

/// Raw REST operations against the organizations backend
#[async_trait]
pub trait OrganizationApi: Send + Sync {
    /// GET /api/organizations
    async fn list_organizations(&self) -> ApiResult<Vec<Organization>>;

    /// GET /api/organizations/{slug}
    async fn get_organization(&self, slug: &str) -> ApiResult<Organization>;

    /// POST /api/organizations
    async fn create_organization(&self, organization: &Organization) -> ApiResult<Organization>;

    /// PUT /api/organizations/{slug}
    async fn update_organization(&self, organization: &Organization) -> ApiResult<Organization>;

    /// DELETE /api/organizations/{slug}, yielding the removed organization
    async fn delete_organization(&self, slug: &str) -> ApiResult<Organization>;

    /// POST /api/organizations/{slug}/add_membership/{onyen}
    async fn add_member(&self, slug: &str, onyen: &str) -> ApiResult<()>;

    /// DELETE /api/organizations/{slug}/remove_membership/{onyen}
    async fn remove_member(&self, slug: &str, onyen: &str) -> ApiResult<()>;

    /// GET /api/organizations/{slug}/members
    async fn get_members(&self, slug: &str) -> ApiResult<Vec<User>>;

    /// GET /api/organizations/{slug}/{onyen}/authleader
    async fn check_leader_status(&self, slug: &str, onyen: &str) -> ApiResult<bool>;

    /// GET /api/organizations/{slug}/status
    async fn get_status(&self, slug: &str) -> ApiResult<OrganizationStatus>;

    /// POST /api/organizations/applications
    async fn submit_application(&self, application: &Application) -> ApiResult<()>;
}

// ============================================================================
// External collaborators
// ============================================================================

/// Source of the signed-in user's profile
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn current_profile(&self) -> ApiResult<Profile>;
}

/// Permission predicate evaluator
pub trait PermissionChecker: Send + Sync {
    /// Check whether the current user may perform `action` on `resource`
    fn check(&self, action: &str, resource: &str) -> bool;
}

/// Presenter for transient notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
