//! Organization status - how a user may join an organization

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Join policy of an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationStatus {
    /// Anyone may join directly
    Open,
    /// Private; no join affordance
    Closed,
    /// Joining requires an application
    Request,
}

impl OrganizationStatus {
    /// Derive the status from the organization's visibility flags
    pub fn derive(public: bool, application_required: bool) -> Self {
        match (public, application_required) {
            (false, _) => Self::Closed,
            (true, true) => Self::Request,
            (true, false) => Self::Open,
        }
    }

    /// Wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Request => "request",
        }
    }
}

impl fmt::Display for OrganizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "request" => Ok(Self::Request),
            other => Err(DomainError::ValidationError(format!(
                "unknown organization status: {other}"
            ))),
        }
    }
}
