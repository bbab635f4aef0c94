//! Ports - traits the infrastructure implements

mod ports;

pub use ports::{ApiResult, Notifier, OrganizationApi, PermissionChecker, ProfileProvider};
