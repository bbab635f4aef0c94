//! Organization dialogs

mod application;
mod member;
mod settings;

pub use application::ApplicationForm;
pub use member::MemberDialog;
pub use settings::SettingsDialog;

use org_core::DomainError;

/// Trimmed onyen, or `BlankOnyen` when nothing was typed
pub(crate) fn parse_onyen(raw: &str) -> Result<&str, DomainError> {
    match raw.trim() {
        "" => Err(DomainError::BlankOnyen),
        onyen => Ok(onyen),
    }
}
