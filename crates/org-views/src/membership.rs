//! Membership query helper
//!
//! Resolves the signed-in user, the roster, membership, and leader status
//! for one organization.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use org_client::{ClientContext, OrganizationService};
use org_core::{ApiResult, OrganizationStatus, Profile, ProfileProvider, User};
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

/// Default number of leader checks in flight
pub const DEFAULT_LEADER_CONCURRENCY: usize = 8;

/// The current user's standing in one organization
#[derive(Debug, Clone)]
pub struct Membership {
    pub profile: Profile,
    /// Empty when the roster is not visible to the user
    pub members: Vec<User>,
    pub is_member: bool,
}

/// Cheap to clone; clones share the cached profile
#[derive(Clone)]
pub struct MembershipQuery {
    service: OrganizationService,
    profiles: Arc<dyn ProfileProvider>,
    profile: Arc<OnceCell<Profile>>,
    concurrency: usize,
}

impl MembershipQuery {
    pub fn new(service: OrganizationService, profiles: Arc<dyn ProfileProvider>) -> Self {
        Self {
            service,
            profiles,
            profile: Arc::new(OnceCell::new()),
            concurrency: DEFAULT_LEADER_CONCURRENCY,
        }
    }

    pub fn from_context(ctx: &ClientContext) -> Self {
        Self::new(ctx.service().clone(), ctx.profiles())
            .with_concurrency(ctx.leader_check_concurrency())
    }

    /// Limit how many leader checks run at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn service(&self) -> &OrganizationService {
        &self.service
    }

    /// Signed-in user's profile, fetched once
    pub async fn current_profile(&self) -> ApiResult<Profile> {
        self.profile
            .get_or_try_init(|| self.profiles.current_profile())
            .await
            .cloned()
    }

    /// Roster of the organization, `None` when it cannot be fetched
    pub async fn members(&self, slug: &str) -> Option<Vec<User>> {
        self.service.get_organization_members(slug).await.ok()
    }

    /// Profile plus roster membership
    ///
    /// Fails only when the profile cannot be resolved. A roster that cannot
    /// be fetched counts as "not a member".
    #[instrument(skip(self))]
    pub async fn membership(&self, slug: &str) -> ApiResult<Membership> {
        let profile = self.current_profile().await?;
        let members = self.members(slug).await.unwrap_or_default();
        let is_member = members.iter().any(|m| m.onyen == profile.onyen());
        debug!(is_member, members = members.len(), "Resolved membership");
        Ok(Membership {
            profile,
            members,
            is_member,
        })
    }

    /// Leader check where a failure counts as "not a leader"
    pub async fn is_leader(&self, slug: &str, onyen: &str) -> bool {
        match self.service.check_leader_status(slug, onyen).await {
            Ok(is_leader) => is_leader,
            Err(e) => {
                warn!(slug, onyen, error = %e, "Leader check failed");
                false
            }
        }
    }

    /// Members that are leaders, in roster order
    ///
    /// At most `concurrency` checks are in flight. Dropping the future
    /// cancels the outstanding ones.
    #[instrument(skip(self, members), fields(members = members.len()))]
    pub async fn leaders(&self, slug: &str, members: &[User]) -> Vec<User> {
        stream::iter(members)
            .map(|member| async move {
                self.is_leader(slug, &member.onyen)
                    .await
                    .then(|| member.clone())
            })
            .buffered(self.concurrency)
            .filter_map(|leader| async move { leader })
            .collect()
            .await
    }

    /// Join policy of the organization, `None` when it cannot be fetched
    pub async fn status(&self, slug: &str) -> Option<OrganizationStatus> {
        self.service.get_organization_status(slug).await.ok()
    }
}
