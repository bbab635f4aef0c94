//! Organization settings dialog
//!
//! Edits the basic attributes of one organization and is the entry point
//! to member management.

use org_client::OrganizationService;
use org_core::{DomainError, Organization};
use tracing::{info, warn};

use super::{parse_onyen, MemberDialog};
use crate::dialog::{AfterClosed, DialogRef, DialogResult};

const MISSING_FIELDS: &str = "All fields must be filled out.";

/// Settings editor for one organization
pub struct SettingsDialog {
    service: OrganizationService,
    organization: Organization,
    pub name: String,
    pub short_description: String,
    pub shorthand: String,
    /// Visibility flag
    pub public: bool,
    pub application_required: bool,
    warning_message: String,
    dialog: DialogRef<Organization>,
}

impl SettingsDialog {
    pub fn open(
        service: OrganizationService,
        organization: Organization,
    ) -> (Self, AfterClosed<Organization>) {
        let (dialog, after_closed) = DialogRef::pair();
        let settings = Self {
            service,
            name: organization.name.clone(),
            short_description: organization.short_description.clone(),
            shorthand: organization.shorthand.clone(),
            public: organization.public,
            application_required: organization.application_required,
            organization,
            warning_message: String::new(),
            dialog,
        };
        (settings, after_closed)
    }

    /// Snapshot taken when the dialog opened
    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    pub fn warning_message(&self) -> &str {
        &self.warning_message
    }

    pub fn is_closed(&self) -> bool {
        self.dialog.is_closed()
    }

    /// Characters typed into the short description
    pub fn description_length(&self) -> usize {
        self.short_description.chars().count()
    }

    /// The snapshot with the edited fields applied
    pub fn draft(&self) -> Organization {
        Organization {
            name: self.name.clone(),
            short_description: self.short_description.clone(),
            shorthand: self.shorthand.clone(),
            public: self.public,
            application_required: self.application_required,
            ..self.organization.clone()
        }
    }

    /// Save the edits; `None` while the dialog stays open
    pub async fn save(&mut self) -> Option<DialogResult<Organization>> {
        if let Some(result) = self.dialog.result() {
            return Some(result.clone());
        }

        let draft = self.draft();
        let required = [&draft.name, &draft.slug, &draft.shorthand, &draft.logo];
        if required.iter().any(|field| field.trim().is_empty()) {
            self.warning_message = MISSING_FIELDS.to_string();
            return None;
        }
        self.warning_message.clear();

        let result = match self.service.update_organization(&draft).await {
            Ok(updated) => {
                info!(slug = %updated.slug, "Organization settings saved");
                self.service.notify_info("Settings saved successfully!");
                DialogResult::Confirmed(updated)
            }
            Err(e) => {
                warn!(error = %e, "Saving organization settings failed");
                self.service.notify_error(save_error_message(&e));
                DialogResult::Failed
            }
        };
        Some(self.dialog.close(result))
    }

    pub fn cancel(&mut self) -> DialogResult<Organization> {
        self.dialog.close(DialogResult::Dismissed)
    }

    /// Open the add/remove member dialog for this organization
    pub fn open_member_dialog(&self) -> (MemberDialog, AfterClosed<()>) {
        MemberDialog::open(self.service.clone(), self.organization.slug.clone())
    }

    /// Add a member without leaving the settings dialog
    pub async fn add_member(&self, onyen: &str) -> bool {
        let onyen = match parse_onyen(onyen) {
            Ok(onyen) => onyen,
            Err(e) => {
                self.service.notify_error(e.to_string());
                return false;
            }
        };
        self.service
            .add_member(&self.organization.slug, onyen)
            .await
            .is_ok()
    }
}

fn save_error_message(err: &DomainError) -> String {
    format!(
        "Error saving settings: {}",
        err.detail().unwrap_or("Unknown error")
    )
}
