//! # org-core
//!
//! Domain layer for the organization directory: entities, value objects,
//! the domain error type, and the ports that the HTTP client, the view
//! models, and the development backend plug into.
//! This crate has no dependency on HTTP, async runtimes, or storage.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Application, ApplicationStatus, Notification, NotificationLevel, Organization, Profile, User,
};
pub use error::DomainError;
pub use traits::{ApiResult, Notifier, OrganizationApi, PermissionChecker, ProfileProvider};
pub use value_objects::{is_valid_slug, OrganizationStatus, PermissionGrant, PermissionSet};
