//! Organization card
//!
//! One entry in the organization directory. After `load` the card knows the
//! join policy, whether the user is a member, and whether they lead it.

use bitflags::bitflags;
use org_core::{Application, Organization, OrganizationStatus};
use tracing::{instrument, warn};

use crate::dialog::{AfterClosed, DialogResult};
use crate::dialogs::{ApplicationForm, SettingsDialog};
use crate::membership::MembershipQuery;

const PROFILE_ERROR: &str = "Error fetching user profile.";

bitflags! {
    /// Affordances a card offers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CardActions: u8 {
        /// Open organization the user has not joined
        const JOIN = 1;
        /// Closed organization
        const PRIVATE = 1 << 1;
        /// Organization that requires an application
        const APPLY = 1 << 2;
        /// The user leads this organization and may edit it
        const LEADER = 1 << 3;
    }
}

impl CardActions {
    pub fn derive(status: Option<OrganizationStatus>, is_member: bool, is_leader: bool) -> Self {
        let mut actions = match status {
            Some(OrganizationStatus::Open) if !is_member => Self::JOIN,
            Some(OrganizationStatus::Closed) => Self::PRIVATE,
            Some(OrganizationStatus::Request) if !is_member => Self::APPLY,
            _ => Self::empty(),
        };
        actions.set(Self::LEADER, is_leader);
        actions
    }
}

/// View model for one organization card
pub struct OrganizationCard {
    organization: Organization,
    membership: MembershipQuery,
    status: Option<OrganizationStatus>,
    is_member: bool,
    is_leader: bool,
    loading: bool,
}

impl OrganizationCard {
    pub fn new(organization: Organization, membership: MembershipQuery) -> Self {
        Self {
            organization,
            membership,
            status: None,
            is_member: false,
            is_leader: false,
            loading: true,
        }
    }

    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    pub fn status(&self) -> Option<OrganizationStatus> {
        self.status
    }

    pub fn is_member(&self) -> bool {
        self.is_member
    }

    pub fn is_leader(&self) -> bool {
        self.is_leader
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn actions(&self) -> CardActions {
        CardActions::derive(self.status, self.is_member, self.is_leader)
    }

    /// Run the leader, status, and membership checks together
    #[instrument(skip(self), fields(slug = %self.organization.slug))]
    pub async fn load(&mut self) {
        self.loading = true;
        let slug = self.organization.slug.as_str();
        let (is_leader, status, is_member) = tokio::join!(
            self.check_leader(slug),
            self.membership.status(slug),
            self.check_member(slug),
        );
        self.is_leader = is_leader;
        self.status = status;
        self.is_member = is_member;
        self.loading = false;
    }

    async fn check_leader(&self, slug: &str) -> bool {
        match self.membership.current_profile().await {
            Ok(profile) => self.membership.is_leader(slug, profile.onyen()).await,
            Err(e) => {
                warn!(error = %e, "Profile lookup failed");
                self.membership.service().notify_error(PROFILE_ERROR);
                false
            }
        }
    }

    async fn check_member(&self, slug: &str) -> bool {
        match self.membership.membership(slug).await {
            Ok(membership) => membership.is_member,
            Err(e) => {
                warn!(error = %e, "Profile lookup failed");
                self.membership.service().notify_error(PROFILE_ERROR);
                false
            }
        }
    }

    /// Add the signed-in user to the organization and refresh membership
    #[instrument(skip(self), fields(slug = %self.organization.slug))]
    pub async fn join(&mut self) -> bool {
        let profile = match self.membership.current_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "Profile lookup failed");
                self.membership.service().notify_error(PROFILE_ERROR);
                return false;
            }
        };

        let slug = self.organization.slug.as_str();
        if self
            .membership
            .service()
            .add_member(slug, profile.onyen())
            .await
            .is_err()
        {
            return false;
        }

        self.is_member = self.check_member(slug).await;
        true
    }

    /// Application form for the signed-in user
    pub async fn apply(&self) -> Option<(ApplicationForm, AfterClosed<Application>)> {
        let Some(organization_id) = self.organization.id else {
            warn!(slug = %self.organization.slug, "Cannot apply to an unsaved organization");
            return None;
        };
        match self.membership.current_profile().await {
            Ok(profile) => Some(ApplicationForm::open(
                self.membership.service().clone(),
                organization_id,
                profile.id(),
            )),
            Err(e) => {
                warn!(error = %e, "Profile lookup failed");
                self.membership.service().notify_error(PROFILE_ERROR);
                None
            }
        }
    }

    /// Settings dialog, offered to leaders only
    pub fn open_settings(&self) -> Option<(SettingsDialog, AfterClosed<Organization>)> {
        self.is_leader.then(|| {
            SettingsDialog::open(
                self.membership.service().clone(),
                self.organization.clone(),
            )
        })
    }

    /// Take the saved organization from a closed settings dialog
    pub fn settings_closed(&mut self, result: DialogResult<Organization>) {
        if let DialogResult::Confirmed(updated) = result {
            self.organization = updated;
        }
    }
}
