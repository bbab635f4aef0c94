//! Add/remove member dialog

use org_client::OrganizationService;
use tracing::debug;

use super::parse_onyen;
use crate::dialog::{AfterClosed, DialogRef, DialogResult};

/// Adds or removes one member of an organization by onyen
pub struct MemberDialog {
    service: OrganizationService,
    slug: String,
    /// Onyen as typed
    pub onyen: String,
    dialog: DialogRef<()>,
}

impl MemberDialog {
    pub fn open(service: OrganizationService, slug: impl Into<String>) -> (Self, AfterClosed<()>) {
        let (dialog, after_closed) = DialogRef::pair();
        let member_dialog = Self {
            service,
            slug: slug.into(),
            onyen: String::new(),
            dialog,
        };
        (member_dialog, after_closed)
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn is_closed(&self) -> bool {
        self.dialog.is_closed()
    }

    /// Add the typed onyen; `None` while the dialog stays open
    pub async fn confirm_add(&mut self) -> Option<DialogResult<()>> {
        if let Some(result) = self.dialog.result() {
            return Some(result.clone());
        }
        let onyen = self.valid_onyen()?;
        let outcome = self.service.add_member(&self.slug, &onyen).await;
        Some(self.close_with(outcome.is_ok()))
    }

    /// Remove the typed onyen; `None` while the dialog stays open
    pub async fn confirm_remove(&mut self) -> Option<DialogResult<()>> {
        if let Some(result) = self.dialog.result() {
            return Some(result.clone());
        }
        let onyen = self.valid_onyen()?;
        let outcome = self.service.remove_member(&self.slug, &onyen).await;
        Some(self.close_with(outcome.is_ok()))
    }

    pub fn cancel(&mut self) -> DialogResult<()> {
        self.dialog.close(DialogResult::Dismissed)
    }

    fn valid_onyen(&self) -> Option<String> {
        match parse_onyen(&self.onyen) {
            Ok(onyen) => Some(onyen.to_string()),
            Err(e) => {
                debug!("Blank onyen rejected");
                self.service.notify_error(e.to_string());
                None
            }
        }
    }

    fn close_with(&mut self, succeeded: bool) -> DialogResult<()> {
        let result = if succeeded {
            DialogResult::Confirmed(())
        } else {
            DialogResult::Failed
        };
        self.dialog.close(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_client::testing::{fixtures, FakeOrganizationApi};
    use org_client::{MemoryNotifier, OrganizationStore};
    use org_core::PermissionSet;
    use std::sync::Arc;

    fn setup() -> (Arc<FakeOrganizationApi>, Arc<MemoryNotifier>, OrganizationService) {
        let api = Arc::new(FakeOrganizationApi::new());
        api.insert_organization(fixtures::organization("acm"));
        api.insert_user(fixtures::user(5, "jdoe"));
        let notifier = Arc::new(MemoryNotifier::new());
        let service = OrganizationService::new(
            api.clone(),
            OrganizationStore::new(),
            notifier.clone(),
            Arc::new(PermissionSet::default()),
        );
        (api, notifier, service)
    }

    #[tokio::test]
    async fn test_blank_onyen_stays_open() {
        let (api, notifier, service) = setup();
        let (mut dialog, _after_closed) = MemberDialog::open(service, "acm");
        dialog.onyen = "   ".to_string();

        assert_eq!(dialog.confirm_add().await, None);
        assert_eq!(dialog.confirm_remove().await, None);

        assert!(!dialog.is_closed());
        assert!(api.calls().is_empty());
        assert_eq!(
            notifier.messages(),
            ["Please enter a valid onyen", "Please enter a valid onyen"]
        );
    }

    #[tokio::test]
    async fn test_add_confirms_with_trimmed_onyen() {
        let (api, notifier, service) = setup();
        let (mut dialog, after_closed) = MemberDialog::open(service, "acm");
        dialog.onyen = " jdoe ".to_string();

        assert_eq!(dialog.confirm_add().await, Some(DialogResult::Confirmed(())));
        assert_eq!(after_closed.await, DialogResult::Confirmed(()));
        assert_eq!(api.roster("acm"), ["jdoe"]);
        assert_eq!(
            notifier.last_message().as_deref(),
            Some("Successfully added jdoe to organization")
        );
    }

    #[tokio::test]
    async fn test_remove_non_member_fails() {
        let (_api, notifier, service) = setup();
        let (mut dialog, after_closed) = MemberDialog::open(service, "acm");
        dialog.onyen = "jdoe".to_string();

        assert_eq!(dialog.confirm_remove().await, Some(DialogResult::Failed));
        assert_eq!(after_closed.await, DialogResult::Failed);
        assert!(notifier.notifications()[0].is_error());
    }

    #[tokio::test]
    async fn test_confirm_after_close_is_noop() {
        let (api, _notifier, service) = setup();
        let (mut dialog, after_closed) = MemberDialog::open(service, "acm");
        dialog.onyen = "jdoe".to_string();

        assert_eq!(dialog.cancel(), DialogResult::Dismissed);
        assert_eq!(dialog.confirm_add().await, Some(DialogResult::Dismissed));
        assert_eq!(after_closed.await, DialogResult::Dismissed);
        assert!(api.calls().is_empty());
    }
}
