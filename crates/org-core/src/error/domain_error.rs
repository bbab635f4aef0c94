//! Domain errors - error types shared by the client, the views, and the backend

use thiserror::Error;
use validator::ValidationErrors;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("No organization found with matching slug: {0}")]
    OrganizationNotFound(String),

    #[error("No user found with matching onyen: {0}")]
    UserNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("All fields must be filled out.")]
    MissingRequiredFields,

    #[error("Name must be at least 4 characters long.")]
    ApplicantNameTooShort,

    #[error("ID must be a 9-digit number.")]
    InvalidApplicantId,

    #[error("Reason for joining is required.")]
    MissingReason,

    #[error("Please enter a valid onyen")]
    BlankOnyen,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not authorized to perform `{action}` on resource `{resource}`")]
    MissingPermission { action: String, resource: String },

    #[error("Not authenticated")]
    Unauthenticated,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Slug already in use: {0}")]
    SlugTaken(String),

    #[error("User is already a member of this organization")]
    AlreadyMember,

    #[error("User is not a member of this organization")]
    NotMember,

    // =========================================================================
    // Remote Errors (returned by the REST backend or the transport)
    // =========================================================================
    #[error(
        "Request failed with status {status}: {}",
        detail.as_deref().unwrap_or("Unknown error")
    )]
    Remote { status: u16, detail: Option<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Create a remote error from a status code and optional server detail
    pub fn remote(status: u16, detail: Option<String>) -> Self {
        Self::Remote { status, detail }
    }

    /// Create a missing permission error
    pub fn missing_permission(action: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::MissingPermission {
            action: action.into(),
            resource: resource.into(),
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::OrganizationNotFound(_) => "UNKNOWN_ORGANIZATION",
            Self::UserNotFound(_) => "UNKNOWN_USER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingRequiredFields => "MISSING_REQUIRED_FIELDS",
            Self::ApplicantNameTooShort => "APPLICANT_NAME_TOO_SHORT",
            Self::InvalidApplicantId => "INVALID_APPLICANT_ID",
            Self::MissingReason => "MISSING_REASON",
            Self::BlankOnyen => "BLANK_ONYEN",

            // Authorization
            Self::MissingPermission { .. } => "MISSING_PERMISSIONS",
            Self::Unauthenticated => "UNAUTHENTICATED",

            // Conflict
            Self::SlugTaken(_) => "SLUG_TAKEN",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::NotMember => "NOT_MEMBER",

            // Remote
            Self::Remote { .. } => "REMOTE_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::OrganizationNotFound(_) | Self::UserNotFound(_) | Self::Remote { status: 404, .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::MissingRequiredFields
                | Self::ApplicantNameTooShort
                | Self::InvalidApplicantId
                | Self::MissingReason
                | Self::BlankOnyen
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::MissingPermission { .. } | Self::Remote { status: 403, .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SlugTaken(_) | Self::AlreadyMember | Self::NotMember)
    }

    /// HTTP status reported by the backend, if the error came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied detail message, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Remote { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// A 403 or 404 from a roster or visibility query.
    ///
    /// These mean "not a member" or "cannot see this", not a failure.
    pub fn is_expected_absence(&self) -> bool {
        matches!(self.status(), Some(403 | 404))
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let blank = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .any(|e| e.code == "blank");
        if blank {
            Self::MissingRequiredFields
        } else {
            Self::ValidationError(errors.to_string())
        }
    }
}
