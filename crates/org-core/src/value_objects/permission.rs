//! Permission grants with `*` wildcards
//!
//! A grant pairs an action pattern (`organization.update`, `organization.*`)
//! with a resource pattern (`organization/acm`, `*`). A check passes when
//! some grant's patterns fully match the requested action and resource.

use serde::{Deserialize, Serialize};

use crate::traits::PermissionChecker;

/// A single permission grant held by a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub action: String,
    pub resource: String,
}

impl PermissionGrant {
    pub fn new(action: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            resource: resource.into(),
        }
    }

    /// Grant that allows everything (administrators)
    pub fn administrator() -> Self {
        Self::new("*", "*")
    }

    /// Grant a leader holds over one organization
    pub fn leader_of(slug: &str) -> Self {
        Self::new("organization.*", format!("organization/{slug}"))
    }

    /// Check whether this grant covers the action on the resource
    #[inline]
    pub fn allows(&self, action: &str, resource: &str) -> bool {
        wildcard_match(&self.action, action) && wildcard_match(&self.resource, resource)
    }
}

/// The full set of grants for one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    grants: Vec<PermissionGrant>,
}

impl PermissionSet {
    pub fn new(grants: Vec<PermissionGrant>) -> Self {
        Self { grants }
    }

    /// Check if any grant covers the action on the resource
    pub fn has(&self, action: &str, resource: &str) -> bool {
        self.grants.iter().any(|g| g.allows(action, resource))
    }

    pub fn grants(&self) -> &[PermissionGrant] {
        &self.grants
    }

    pub fn push(&mut self, grant: PermissionGrant) {
        if !self.grants.contains(&grant) {
            self.grants.push(grant);
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl PermissionChecker for PermissionSet {
    fn check(&self, action: &str, resource: &str) -> bool {
        self.has(action, resource)
    }
}

impl FromIterator<PermissionGrant> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = PermissionGrant>>(iter: I) -> Self {
        let mut set = Self::default();
        for grant in iter {
            set.push(grant);
        }
        set
    }
}

/// Full-string glob match where `*` matches any run of characters
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let p = pattern.as_bytes();
    let t = text.as_bytes();
    let (mut pi, mut ti) = (0, 0);
    // Position of the last `*` in the pattern and the text index it was tried at
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && p[pi] == b'*' {
            backtrack = Some((pi, ti));
            pi += 1;
        } else if pi < p.len() && p[pi] == t[ti] {
            pi += 1;
            ti += 1;
        } else if let Some((star, matched)) = backtrack {
            pi = star + 1;
            ti = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|&b| b == b'*')
}
