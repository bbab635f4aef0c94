//! Organization details
//!
//! Member roster and leader list for one organization page.

use org_core::{Organization, User};
use tracing::{debug, instrument};

use crate::membership::MembershipQuery;

/// View model for the organization details page
pub struct OrganizationDetails {
    organization: Organization,
    membership: MembershipQuery,
    members: Vec<User>,
    leaders: Vec<User>,
    is_member: bool,
}

impl OrganizationDetails {
    pub fn new(organization: Organization, membership: MembershipQuery) -> Self {
        Self {
            organization,
            membership,
            members: Vec::new(),
            leaders: Vec::new(),
            is_member: false,
        }
    }

    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    /// Roster in backend order; empty when hidden from the user
    pub fn members(&self) -> &[User] {
        &self.members
    }

    /// Leaders in roster order
    pub fn leaders(&self) -> &[User] {
        &self.leaders
    }

    pub fn is_member(&self) -> bool {
        self.is_member
    }

    /// Fetch the roster, then resolve which members lead the organization
    #[instrument(skip(self), fields(slug = %self.organization.slug))]
    pub async fn load(&mut self) {
        let slug = self.organization.slug.as_str();
        let Ok(membership) = self.membership.membership(slug).await else {
            self.members.clear();
            self.leaders.clear();
            self.is_member = false;
            return;
        };

        let leaders = self.membership.leaders(slug, &membership.members).await;
        debug!(
            members = membership.members.len(),
            leaders = leaders.len(),
            "Organization details loaded"
        );
        self.members = membership.members;
        self.leaders = leaders;
        self.is_member = membership.is_member;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_client::testing::{fixtures, FakeOrganizationApi, StaticProfileProvider};
    use org_client::{MemoryNotifier, OrganizationService, OrganizationStore};
    use org_core::{DomainError, PermissionSet};
    use std::sync::Arc;

    fn setup(
        profiles: StaticProfileProvider,
    ) -> (Arc<FakeOrganizationApi>, Arc<MemoryNotifier>, OrganizationDetails) {
        let api = Arc::new(FakeOrganizationApi::new());
        let org = api.insert_organization(fixtures::organization("cssg"));
        for (id, onyen) in [(1, "jdoe"), (2, "alice"), (3, "bob")] {
            api.insert_user(fixtures::user(id, onyen));
            api.add_to_roster("cssg", onyen);
        }
        api.make_leader("cssg", "bob");
        api.make_leader("cssg", "alice");

        let notifier = Arc::new(MemoryNotifier::new());
        let service = OrganizationService::new(
            api.clone(),
            OrganizationStore::new(),
            notifier.clone(),
            Arc::new(PermissionSet::default()),
        );
        let query = MembershipQuery::new(service, Arc::new(profiles));
        (api, notifier, OrganizationDetails::new(org, query))
    }

    #[tokio::test]
    async fn test_load_members_and_leaders() {
        let (_api, notifier, mut details) =
            setup(StaticProfileProvider::for_user(fixtures::user(1, "jdoe")));

        details.load().await;

        let onyens: Vec<_> = details.members().iter().map(|u| u.onyen.as_str()).collect();
        assert_eq!(onyens, ["jdoe", "alice", "bob"]);
        let leaders: Vec<_> = details.leaders().iter().map(|u| u.onyen.as_str()).collect();
        assert_eq!(leaders, ["alice", "bob"]);
        assert!(details.is_member());
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn test_hidden_roster() {
        let (api, notifier, mut details) =
            setup(StaticProfileProvider::for_user(fixtures::user(9, "outsider")));
        api.fail("get_members", DomainError::remote(403, None));

        details.load().await;

        assert!(details.members().is_empty());
        assert!(details.leaders().is_empty());
        assert!(!details.is_member());
        assert_eq!(api.call_count("check_leader_status"), 0);
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn test_profile_failure_is_quiet() {
        let (api, notifier, mut details) =
            setup(StaticProfileProvider::failing(DomainError::remote(401, None)));

        details.load().await;

        assert!(!details.is_member());
        assert!(details.members().is_empty());
        assert_eq!(api.call_count("get_members"), 0);
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn test_failed_leader_checks_are_skipped() {
        let (api, notifier, mut details) =
            setup(StaticProfileProvider::for_user(fixtures::user(1, "jdoe")));
        api.fail("check_leader_status", DomainError::Transport("reset".to_string()));

        details.load().await;

        assert_eq!(details.members().len(), 3);
        assert!(details.leaders().is_empty());
        assert_eq!(notifier.messages().len(), 3);
    }
}
