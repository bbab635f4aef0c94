//! Organization directory store
//!
//! A cloneable handle over a `tokio::sync::watch` channel. Every clone sees
//! the same list; subscribers observe each new snapshot.

use std::sync::Arc;

use org_core::{Organization, PermissionChecker};
use tokio::sync::watch;

/// Permission action that marks an organization as administrable
pub const ADMIN_ACTION: &str = "organization.*";

/// Shared organization list
#[derive(Clone)]
pub struct OrganizationStore {
    tx: Arc<watch::Sender<Vec<Organization>>>,
}

impl OrganizationStore {
    pub fn new() -> Self {
        Self::with_organizations(Vec::new())
    }

    pub fn with_organizations(organizations: Vec<Organization>) -> Self {
        let (tx, _rx) = watch::channel(organizations);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current list
    pub fn organizations(&self) -> Vec<Organization> {
        self.tx.borrow().clone()
    }

    /// Receiver that is notified of every change
    pub fn subscribe(&self) -> watch::Receiver<Vec<Organization>> {
        self.tx.subscribe()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<Organization> {
        self.tx.borrow().iter().find(|o| o.slug == slug).cloned()
    }

    pub fn find_by_id(&self, id: i64) -> Option<Organization> {
        self.tx.borrow().iter().find(|o| o.has_id(id)).cloned()
    }

    /// Organizations the checker grants `organization.*` on
    pub fn admin_organizations(&self, checker: &dyn PermissionChecker) -> Vec<Organization> {
        self.tx
            .borrow()
            .iter()
            .filter(|o| checker.check(ADMIN_ACTION, &o.resource()))
            .cloned()
            .collect()
    }

    /// Replace the whole list
    pub fn replace_all(&self, organizations: Vec<Organization>) {
        self.tx.send_replace(organizations);
    }

    pub fn append(&self, organization: Organization) {
        self.tx.send_modify(|orgs| orgs.push(organization));
    }

    /// Replace the entry with the same id in place, or append
    pub fn upsert(&self, organization: Organization) {
        self.tx.send_modify(|orgs| {
            let Some(id) = organization.id else {
                orgs.push(organization);
                return;
            };
            match orgs.iter().position(|o| o.has_id(id)) {
                Some(index) => {
                    // Collapse any duplicates onto the first position
                    orgs.retain(|o| !o.has_id(id));
                    orgs.insert(index, organization);
                }
                None => orgs.push(organization),
            }
        });
    }

    /// Remove every entry with the given id
    pub fn remove(&self, id: i64) {
        self.tx.send_if_modified(|orgs| {
            let before = orgs.len();
            orgs.retain(|o| !o.has_id(id));
            orgs.len() != before
        });
    }

    /// Remove every entry with the given slug
    pub fn remove_slug(&self, slug: &str) {
        self.tx.send_if_modified(|orgs| {
            let before = orgs.len();
            orgs.retain(|o| o.slug != slug);
            orgs.len() != before
        });
    }
}

impl Default for OrganizationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OrganizationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrganizationStore")
            .field("len", &self.len())
            .finish()
    }
}
