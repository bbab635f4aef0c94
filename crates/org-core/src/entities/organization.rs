//! Organization entity - a student organization listed in the directory

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::value_objects::{is_valid_slug, OrganizationStatus};

/// Organization entity
///
/// Mirrors the backend's JSON shape field for field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Organization {
    /// Backend identifier; absent until the organization is created
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub shorthand: String,
    #[validate(custom(function = "url_safe_slug"))]
    pub slug: String,
    #[validate(custom(function = "not_blank"))]
    pub logo: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub linked_in: String,
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub heel_life: String,
    /// Visibility flag
    pub public: bool,
    pub application_required: bool,
}

impl Organization {
    /// Create a new, not yet persisted organization
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        shorthand: impl Into<String>,
        logo: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            shorthand: shorthand.into(),
            logo: logo.into(),
            public: true,
            ..Self::default()
        }
    }

    /// Permission resource string, `organization/{slug}`
    pub fn resource(&self) -> String {
        format!("organization/{}", self.slug)
    }

    /// Join policy derived from the visibility flags
    pub fn status(&self) -> OrganizationStatus {
        OrganizationStatus::derive(self.public, self.application_required)
    }

    /// Check whether this snapshot refers to the given backend id
    #[inline]
    pub fn has_id(&self, id: i64) -> bool {
        self.id == Some(id)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn url_safe_slug(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if !is_valid_slug(value) {
        return Err(ValidationError::new("invalid_slug"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn chess() -> Organization {
        Organization::new("Chess Club", "chess", "CC", "logo.png")
    }

    #[test]
    fn test_valid_organization() {
        assert!(chess().validate().is_ok());
    }

    #[test]
    fn test_blank_fields_rejected() {
        for mutate in [
            (|o: &mut Organization| o.name = "   ".to_string()) as fn(&mut Organization),
            |o| o.shorthand = String::new(),
            |o| o.logo = " ".to_string(),
            |o| o.slug = String::new(),
        ] {
            let mut org = chess();
            mutate(&mut org);
            let err: DomainError = org.validate().unwrap_err().into();
            assert_eq!(err, DomainError::MissingRequiredFields);
        }
    }

    #[test]
    fn test_unsafe_slug_rejected() {
        let mut org = chess();
        org.slug = "Chess Club".to_string();
        let err: DomainError = org.validate().unwrap_err().into();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn test_status_and_resource() {
        let mut org = chess();
        assert_eq!(org.status(), OrganizationStatus::Open);
        org.application_required = true;
        assert_eq!(org.status(), OrganizationStatus::Request);
        org.public = false;
        assert_eq!(org.status(), OrganizationStatus::Closed);
        assert_eq!(org.resource(), "organization/chess");
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let json = r#"{
            "id": 7,
            "name": "Chess Club",
            "shorthand": "CC",
            "slug": "chess",
            "logo": "logo.png",
            "public": true,
            "application_required": false
        }"#;
        let org: Organization = serde_json::from_str(json).unwrap();
        assert!(org.has_id(7));
        assert_eq!(org.short_description, "");
    }
}
