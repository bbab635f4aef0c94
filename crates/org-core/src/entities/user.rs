//! User entity - a member of one or more organizations

use serde::{Deserialize, Serialize};

use crate::value_objects::{PermissionGrant, PermissionSet};

/// User as returned in organization rosters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Unique login handle
    pub onyen: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub pronouns: String,
}

impl User {
    pub fn new(
        id: i64,
        onyen: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            onyen: onyen.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: String::new(),
            pronouns: String::new(),
        }
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The signed-in user together with their permission grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub permissions: Vec<PermissionGrant>,
}

impl Profile {
    pub fn new(user: User, permissions: Vec<PermissionGrant>) -> Self {
        Self { user, permissions }
    }

    #[inline]
    pub fn onyen(&self) -> &str {
        &self.user.onyen
    }

    #[inline]
    pub fn id(&self) -> i64 {
        self.user.id
    }

    /// Collect the grants into a checkable set
    pub fn permission_set(&self) -> PermissionSet {
        self.permissions.iter().cloned().collect()
    }
}
