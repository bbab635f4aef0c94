//! In-memory organization directory
//!
//! Organizations, users, rosters, grants, and applications behind one
//! `RwLock`. Every mutating call checks the subject's permissions first.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use org_core::{
    Application, DomainError, Organization, OrganizationStatus, PermissionGrant, PermissionSet,
    Profile, User,
};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

type DirectoryResult<T> = Result<T, DomainError>;

/// An application as stored by the backend
#[derive(Debug, Clone, Serialize)]
pub struct StoredApplication {
    pub id: Uuid,
    #[serde(flatten)]
    pub application: Application,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Default)]
struct DirectoryData {
    organizations: Vec<Organization>,
    users: HashMap<String, User>,
    grants: HashMap<String, PermissionSet>,
    /// Organization id to member onyens, in join order
    rosters: HashMap<i64, Vec<String>>,
    applications: Vec<StoredApplication>,
    next_id: i64,
}

impl DirectoryData {
    fn organization(&self, slug: &str) -> DirectoryResult<&Organization> {
        self.organizations
            .iter()
            .find(|o| o.slug == slug)
            .ok_or_else(|| DomainError::OrganizationNotFound(slug.to_string()))
    }

    fn user(&self, onyen: &str) -> DirectoryResult<&User> {
        self.users
            .get(onyen)
            .ok_or_else(|| DomainError::UserNotFound(onyen.to_string()))
    }

    fn permits(&self, onyen: &str, action: &str, resource: &str) -> bool {
        self.grants
            .get(onyen)
            .is_some_and(|grants| grants.has(action, resource))
    }

    fn enforce(&self, subject: &User, action: &str, resource: &str) -> DirectoryResult<()> {
        if self.permits(&subject.onyen, action, resource) {
            Ok(())
        } else {
            Err(DomainError::missing_permission(action, resource))
        }
    }

    fn is_member(&self, organization_id: i64, onyen: &str) -> bool {
        self.rosters
            .get(&organization_id)
            .is_some_and(|roster| roster.iter().any(|o| o == onyen))
    }
}

/// Shared directory state
#[derive(Default)]
pub struct Directory {
    data: RwLock<DirectoryData>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    // === Seeding ===

    pub fn insert_user(&self, user: User, grants: Vec<PermissionGrant>) {
        let mut data = self.data.write();
        data.grants
            .insert(user.onyen.clone(), grants.into_iter().collect());
        data.users.insert(user.onyen.clone(), user);
    }

    /// Store an organization as-is, assigning an id when missing
    pub fn insert_organization(&self, mut organization: Organization) -> Organization {
        let mut data = self.data.write();
        match organization.id {
            Some(id) => data.next_id = data.next_id.max(id),
            None => {
                data.next_id += 1;
                organization.id = Some(data.next_id);
            }
        }
        data.organizations.push(organization.clone());
        organization
    }

    pub fn insert_member(&self, slug: &str, onyen: &str) -> DirectoryResult<()> {
        let mut data = self.data.write();
        let id = data.organization(slug)?.id.unwrap_or_default();
        data.user(onyen)?;
        let roster = data.rosters.entry(id).or_default();
        if !roster.iter().any(|o| o == onyen) {
            roster.push(onyen.to_string());
        }
        Ok(())
    }

    // === Queries ===

    pub fn user(&self, onyen: &str) -> DirectoryResult<User> {
        self.data.read().user(onyen).cloned()
    }

    pub fn profile(&self, onyen: &str) -> DirectoryResult<Profile> {
        let data = self.data.read();
        let user = data.user(onyen)?.clone();
        let grants = data
            .grants
            .get(onyen)
            .map(|g| g.grants().to_vec())
            .unwrap_or_default();
        Ok(Profile::new(user, grants))
    }

    pub fn list(&self) -> Vec<Organization> {
        self.data.read().organizations.clone()
    }

    pub fn get(&self, slug: &str) -> DirectoryResult<Organization> {
        self.data.read().organization(slug).cloned()
    }

    pub fn status(&self, slug: &str) -> DirectoryResult<OrganizationStatus> {
        Ok(self.data.read().organization(slug)?.status())
    }

    /// Every received application, for reviewers
    pub fn applications(&self, subject: &User) -> DirectoryResult<Vec<StoredApplication>> {
        let data = self.data.read();
        data.enforce(subject, "organization.get_applications", "organization")?;
        Ok(data.applications.clone())
    }

    // === Organization CRUD ===

    pub fn create(
        &self,
        subject: &User,
        organization: Organization,
    ) -> DirectoryResult<Organization> {
        let mut data = self.data.write();
        data.enforce(subject, "organization.create", "organization")?;
        if data.organization(&organization.slug).is_ok() {
            return Err(DomainError::SlugTaken(organization.slug));
        }

        data.next_id += 1;
        let created = Organization {
            id: Some(data.next_id),
            ..organization
        };
        data.organizations.push(created.clone());

        // The creator leads the new organization
        data.grants
            .entry(subject.onyen.clone())
            .or_default()
            .push(PermissionGrant::leader_of(&created.slug));

        info!(slug = %created.slug, id = ?created.id, "Organization created");
        Ok(created)
    }

    /// Update the organization whose id is in the body
    ///
    /// The path slug must be the record's current slug or its new one. The
    /// subject needs `organization.update` on both.
    pub fn update(
        &self,
        subject: &User,
        slug: &str,
        organization: Organization,
    ) -> DirectoryResult<Organization> {
        let mut data = self.data.write();

        let not_found = || DomainError::OrganizationNotFound(slug.to_string());
        let id = organization.id.ok_or_else(not_found)?;
        let index = data
            .organizations
            .iter()
            .position(|o| o.has_id(id))
            .ok_or_else(not_found)?;
        let current = data.organizations[index].resource();
        if data.organizations[index].slug != slug && organization.slug != slug {
            return Err(not_found());
        }

        data.enforce(subject, "organization.update", &current)?;
        if organization.resource() != current {
            data.enforce(subject, "organization.update", &organization.resource())?;
        }

        let slug_taken = data
            .organizations
            .iter()
            .any(|o| o.slug == organization.slug && !o.has_id(id));
        if slug_taken {
            return Err(DomainError::SlugTaken(organization.slug));
        }

        data.organizations[index] = organization.clone();
        info!(slug = %organization.slug, id, "Organization updated");
        Ok(organization)
    }

    pub fn delete(&self, subject: &User, slug: &str) -> DirectoryResult<Organization> {
        let mut data = self.data.write();
        data.enforce(subject, "organization.delete", "organization")?;

        let index = data
            .organizations
            .iter()
            .position(|o| o.slug == slug)
            .ok_or_else(|| DomainError::OrganizationNotFound(slug.to_string()))?;
        let removed = data.organizations.remove(index);
        if let Some(id) = removed.id {
            data.rosters.remove(&id);
        }

        info!(slug, "Organization deleted");
        Ok(removed)
    }

    // === Membership ===

    /// Roster, visible to members and to anyone who may list users
    pub fn members(&self, subject: &User, slug: &str) -> DirectoryResult<Vec<User>> {
        let data = self.data.read();
        let organization = data.organization(slug)?;
        let id = organization.id.unwrap_or_default();

        if !data.is_member(id, &subject.onyen) {
            data.enforce(subject, "organization.get_all_users", &organization.resource())?;
        }

        let members = data
            .rosters
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|onyen| data.users.get(onyen).cloned())
            .collect();
        Ok(members)
    }

    /// Whether `onyen` may update the organization
    pub fn is_leader(&self, slug: &str, onyen: &str) -> DirectoryResult<bool> {
        let data = self.data.read();
        let organization = data.organization(slug)?;
        data.user(onyen)?;
        Ok(data.permits(onyen, "organization.update", &organization.resource()))
    }

    pub fn add_membership(&self, subject: &User, slug: &str, onyen: &str) -> DirectoryResult<()> {
        let mut data = self.data.write();
        let organization = data.organization(slug)?;
        let (id, resource, status) = (
            organization.id.unwrap_or_default(),
            organization.resource(),
            organization.status(),
        );

        let joining_open = subject.onyen == onyen && status == OrganizationStatus::Open;
        if !joining_open {
            data.enforce(subject, "organization.add_membership", &resource)?;
        }
        data.user(onyen)?;
        if data.is_member(id, onyen) {
            return Err(DomainError::AlreadyMember);
        }

        data.rosters.entry(id).or_default().push(onyen.to_string());
        debug!(slug, onyen, "Membership added");
        Ok(())
    }

    pub fn remove_membership(
        &self,
        subject: &User,
        slug: &str,
        onyen: &str,
    ) -> DirectoryResult<()> {
        let mut data = self.data.write();
        let organization = data.organization(slug)?;
        let (id, resource) = (organization.id.unwrap_or_default(), organization.resource());

        let leaving = subject.onyen == onyen && data.is_member(id, onyen);
        if !leaving {
            data.enforce(subject, "organization.remove_membership", &resource)?;
        }
        data.user(onyen)?;
        if !data.is_member(id, onyen) {
            return Err(DomainError::NotMember);
        }

        if let Some(roster) = data.rosters.get_mut(&id) {
            roster.retain(|o| o != onyen);
        }
        debug!(slug, onyen, "Membership removed");
        Ok(())
    }

    // === Applications ===

    pub fn submit_application(
        &self,
        application: Application,
    ) -> DirectoryResult<StoredApplication> {
        application.validate()?;
        let mut data = self.data.write();
        let exists = data
            .organizations
            .iter()
            .any(|o| o.has_id(application.organization_id));
        if !exists {
            return Err(DomainError::OrganizationNotFound(
                application.organization_id.to_string(),
            ));
        }

        let stored = StoredApplication {
            id: Uuid::new_v4(),
            application,
            submitted_at: Utc::now(),
        };
        data.applications.push(stored.clone());
        info!(id = %stored.id, "Application received");
        Ok(stored)
    }
}
