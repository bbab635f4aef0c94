//! Application form dialog

use org_client::OrganizationService;
use org_core::{Application, ApplicationStatus};
use tracing::{info, warn};

use crate::dialog::{AfterClosed, DialogRef, DialogResult};

/// Join application for an organization that requires one
pub struct ApplicationForm {
    service: OrganizationService,
    organization_id: i64,
    user_id: i64,
    pub name: String,
    /// 9-digit student id
    pub pid: String,
    pub reason: String,
    warning_message: String,
    dialog: DialogRef<Application>,
}

impl ApplicationForm {
    pub fn open(
        service: OrganizationService,
        organization_id: i64,
        user_id: i64,
    ) -> (Self, AfterClosed<Application>) {
        let (dialog, after_closed) = DialogRef::pair();
        let form = Self {
            service,
            organization_id,
            user_id,
            name: String::new(),
            pid: String::new(),
            reason: String::new(),
            warning_message: String::new(),
            dialog,
        };
        (form, after_closed)
    }

    pub fn organization_id(&self) -> i64 {
        self.organization_id
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Inline validation message, empty when the form is valid
    pub fn warning_message(&self) -> &str {
        &self.warning_message
    }

    pub fn is_closed(&self) -> bool {
        self.dialog.is_closed()
    }

    /// Validate and submit; `None` while the form stays open
    pub async fn submit(&mut self) -> Option<DialogResult<Application>> {
        if let Some(result) = self.dialog.result() {
            return Some(result.clone());
        }

        if let Err(e) = Application::validate_fields(&self.name, &self.pid, &self.reason) {
            self.warning_message = e.to_string();
            return None;
        }
        self.warning_message.clear();

        let application = Application {
            organization_id: self.organization_id,
            name: self.name.clone(),
            pid: self.pid.clone(),
            user_id: self.user_id,
            reason_to_join: self.reason.clone(),
            status: ApplicationStatus::Pending,
        };

        let result = match self.service.submit_application(&application).await {
            Ok(()) => {
                info!(organization_id = self.organization_id, "Application submitted");
                self.service.notify_info("Application submitted successfully!");
                DialogResult::Confirmed(application)
            }
            Err(e) => {
                warn!(error = %e, "Application submission failed");
                self.service.notify_error("Error submitting application.");
                DialogResult::Failed
            }
        };
        Some(self.dialog.close(result))
    }

    pub fn cancel(&mut self) -> DialogResult<Application> {
        self.dialog.close(DialogResult::Dismissed)
    }
}
