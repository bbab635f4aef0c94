//! In-memory fakes for tests
//!
//! `FakeOrganizationApi` answers like the backend does, records every call,
//! and can be told to fail a named operation.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use org_core::{
    ApiResult, Application, DomainError, Organization, OrganizationApi, OrganizationStatus,
    PermissionGrant, Profile, ProfileProvider, User,
};
use parking_lot::{Mutex, MutexGuard};

#[derive(Default)]
struct FakeState {
    organizations: Vec<Organization>,
    users: HashMap<String, User>,
    rosters: HashMap<String, Vec<String>>,
    leaders: HashSet<(String, String)>,
    failures: HashMap<&'static str, DomainError>,
    calls: Vec<&'static str>,
    applications: Vec<Application>,
    next_id: i64,
    leader_delay: Option<Duration>,
}

/// In-memory `OrganizationApi`
#[derive(Default)]
pub struct FakeOrganizationApi {
    state: Mutex<FakeState>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

fn not_found(what: &str) -> DomainError {
    DomainError::remote(404, Some(format!("No {what} found")))
}

impl FakeOrganizationApi {
    pub fn new() -> Self {
        Self::default()
    }

    // === Seeding ===

    /// Store an organization, assigning an id when it has none
    pub fn insert_organization(&self, mut organization: Organization) -> Organization {
        let mut state = self.state.lock();
        if organization.id.is_none() {
            state.next_id += 1;
            organization.id = Some(state.next_id);
        }
        state.organizations.push(organization.clone());
        organization
    }

    pub fn insert_user(&self, user: User) {
        self.state.lock().users.insert(user.onyen.clone(), user);
    }

    pub fn add_to_roster(&self, slug: &str, onyen: &str) {
        let mut state = self.state.lock();
        let roster = state.rosters.entry(slug.to_string()).or_default();
        if !roster.iter().any(|o| o == onyen) {
            roster.push(onyen.to_string());
        }
    }

    pub fn make_leader(&self, slug: &str, onyen: &str) {
        self.add_to_roster(slug, onyen);
        self.state
            .lock()
            .leaders
            .insert((slug.to_string(), onyen.to_string()));
    }

    /// Make the named operation return `error` until cleared
    pub fn fail(&self, operation: &'static str, error: DomainError) {
        self.state.lock().failures.insert(operation, error);
    }

    pub fn clear_failure(&self, operation: &'static str) {
        self.state.lock().failures.remove(operation);
    }

    /// Slow down leader checks so concurrency can be observed
    pub fn delay_leader_checks(&self, delay: Duration) {
        self.state.lock().leader_delay = Some(delay);
    }

    // === Inspection ===

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| **c == operation)
            .count()
    }

    pub fn applications(&self) -> Vec<Application> {
        self.state.lock().applications.clone()
    }

    pub fn roster(&self, slug: &str) -> Vec<String> {
        self.state
            .lock()
            .rosters
            .get(slug)
            .cloned()
            .unwrap_or_default()
    }

    /// Highest number of leader checks that ran at the same time
    pub fn max_concurrent_leader_checks(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn begin(&self, operation: &'static str) -> ApiResult<MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock();
        state.calls.push(operation);
        if let Some(err) = state.failures.get(operation).cloned() {
            return Err(err);
        }
        Ok(state)
    }
}

impl FakeState {
    fn organization(&self, slug: &str) -> ApiResult<&Organization> {
        self.organizations
            .iter()
            .find(|o| o.slug == slug)
            .ok_or_else(|| not_found("organization"))
    }
}

#[async_trait]
impl OrganizationApi for FakeOrganizationApi {
    async fn list_organizations(&self) -> ApiResult<Vec<Organization>> {
        Ok(self.begin("list_organizations")?.organizations.clone())
    }

    async fn get_organization(&self, slug: &str) -> ApiResult<Organization> {
        self.begin("get_organization")?.organization(slug).cloned()
    }

    async fn create_organization(&self, organization: &Organization) -> ApiResult<Organization> {
        let mut state = self.begin("create_organization")?;
        if state.organization(&organization.slug).is_ok() {
            return Err(DomainError::remote(422, Some("Slug already in use".to_string())));
        }
        state.next_id += 1;
        let created = Organization {
            id: Some(state.next_id),
            ..organization.clone()
        };
        state.organizations.push(created.clone());
        Ok(created)
    }

    async fn update_organization(&self, organization: &Organization) -> ApiResult<Organization> {
        let mut state = self.begin("update_organization")?;
        let id = organization.id.ok_or_else(|| not_found("organization"))?;
        let existing = state
            .organizations
            .iter_mut()
            .find(|o| o.has_id(id))
            .ok_or_else(|| not_found("organization"))?;
        *existing = organization.clone();
        Ok(organization.clone())
    }

    async fn delete_organization(&self, slug: &str) -> ApiResult<Organization> {
        let mut state = self.begin("delete_organization")?;
        let deleted = state.organization(slug)?.clone();
        state.organizations.retain(|o| o.slug != slug);
        state.rosters.remove(slug);
        Ok(deleted)
    }

    async fn add_member(&self, slug: &str, onyen: &str) -> ApiResult<()> {
        let mut state = self.begin("add_member")?;
        state.organization(slug)?;
        if !state.users.contains_key(onyen) {
            return Err(not_found("user"));
        }
        let roster = state.rosters.entry(slug.to_string()).or_default();
        if roster.iter().any(|o| o == onyen) {
            return Err(DomainError::remote(405, Some("User is already a member".to_string())));
        }
        roster.push(onyen.to_string());
        Ok(())
    }

    async fn remove_member(&self, slug: &str, onyen: &str) -> ApiResult<()> {
        let mut state = self.begin("remove_member")?;
        state.organization(slug)?;
        let roster = state.rosters.entry(slug.to_string()).or_default();
        let before = roster.len();
        roster.retain(|o| o != onyen);
        if roster.len() == before {
            return Err(DomainError::remote(405, Some("User is not a member".to_string())));
        }
        Ok(())
    }

    async fn get_members(&self, slug: &str) -> ApiResult<Vec<User>> {
        let state = self.begin("get_members")?;
        state.organization(slug)?;
        let members = state
            .rosters
            .get(slug)
            .into_iter()
            .flatten()
            .filter_map(|onyen| state.users.get(onyen).cloned())
            .collect();
        Ok(members)
    }

    async fn check_leader_status(&self, slug: &str, onyen: &str) -> ApiResult<bool> {
        let (delay, is_leader) = {
            let state = self.begin("check_leader_status")?;
            let is_leader = state.leaders.contains(&(slug.to_string(), onyen.to_string()));
            (state.leader_delay, is_leader)
        };

        if let Some(delay) = delay {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(is_leader)
    }

    async fn get_status(&self, slug: &str) -> ApiResult<OrganizationStatus> {
        Ok(self.begin("get_status")?.organization(slug)?.status())
    }

    async fn submit_application(&self, application: &Application) -> ApiResult<()> {
        self.begin("submit_application")?
            .applications
            .push(application.clone());
        Ok(())
    }
}

/// Profile provider that always answers with the same profile
pub struct StaticProfileProvider {
    profile: ApiResult<Profile>,
}

impl StaticProfileProvider {
    pub fn new(profile: Profile) -> Self {
        Self { profile: Ok(profile) }
    }

    /// Provider whose lookups fail with `error`
    pub fn failing(error: DomainError) -> Self {
        Self {
            profile: Err(error),
        }
    }

    pub fn for_user(user: User) -> Self {
        Self::new(Profile::new(user, Vec::new()))
    }

    pub fn with_grants(user: User, grants: Vec<PermissionGrant>) -> Self {
        Self::new(Profile::new(user, grants))
    }
}

#[async_trait]
impl ProfileProvider for StaticProfileProvider {
    async fn current_profile(&self) -> ApiResult<Profile> {
        self.profile.clone()
    }
}

/// Ready-made domain values
pub mod fixtures {
    use org_core::{Organization, User};

    /// Open organization named after its slug
    pub fn organization(slug: &str) -> Organization {
        Organization::new(slug.to_uppercase(), slug, slug.to_uppercase(), "logo.png")
    }

    pub fn user(id: i64, onyen: &str) -> User {
        let mut user = User::new(id, onyen, onyen, "Tester");
        user.email = format!("{onyen}@unc.edu");
        user
    }
}
