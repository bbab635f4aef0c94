//! Value objects - immutable types that represent domain concepts

mod permission;
mod slug;
mod status;

pub use permission::{wildcard_match, PermissionGrant, PermissionSet};
pub use slug::is_valid_slug;
pub use status::OrganizationStatus;
