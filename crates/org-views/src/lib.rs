//! # org-views
//!
//! Headless view models for the organization pages. Each type holds the
//! state a renderer binds to and talks to the backend only through
//! `OrganizationService`.

pub mod card;
pub mod details;
pub mod dialog;
pub mod dialogs;
pub mod membership;

// Re-export commonly used types at crate root
pub use card::{CardActions, OrganizationCard};
pub use details::OrganizationDetails;
pub use dialog::{AfterClosed, DialogRef, DialogResult};
pub use dialogs::{ApplicationForm, MemberDialog, SettingsDialog};
pub use membership::{Membership, MembershipQuery};
