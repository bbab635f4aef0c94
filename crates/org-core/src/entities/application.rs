//! Application entity - a request to join an organization that requires one

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Review state of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// Join application payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub organization_id: i64,
    /// Applicant name as typed into the form
    pub name: String,
    /// Applicant's 9-digit student id
    pub pid: String,
    /// Backend id of the applying user
    pub user_id: i64,
    pub reason_to_join: String,
    #[serde(default)]
    pub status: ApplicationStatus,
}

impl Application {
    /// Minimum applicant name length
    pub const MIN_NAME_LEN: usize = 4;

    /// Length of a student id
    pub const PID_LEN: usize = 9;

    /// Build a pending application after validating the form fields
    pub fn pending(
        organization_id: i64,
        user_id: i64,
        name: impl Into<String>,
        pid: impl Into<String>,
        reason_to_join: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let application = Self {
            organization_id,
            name: name.into(),
            pid: pid.into(),
            user_id,
            reason_to_join: reason_to_join.into(),
            status: ApplicationStatus::Pending,
        };
        application.validate()?;
        Ok(application)
    }

    /// Validate form fields in precedence order: name, then id, then reason
    pub fn validate(&self) -> Result<(), DomainError> {
        Self::validate_fields(&self.name, &self.pid, &self.reason_to_join)
    }

    /// Same checks on raw form input
    pub fn validate_fields(name: &str, pid: &str, reason: &str) -> Result<(), DomainError> {
        if name.chars().count() < Self::MIN_NAME_LEN {
            return Err(DomainError::ApplicantNameTooShort);
        }
        if !Self::is_valid_pid(pid) {
            return Err(DomainError::InvalidApplicantId);
        }
        if reason.is_empty() {
            return Err(DomainError::MissingReason);
        }
        Ok(())
    }

    /// Exactly nine ASCII digits
    pub fn is_valid_pid(pid: &str) -> bool {
        pid.len() == Self::PID_LEN && pid.bytes().all(|b| b.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_application() {
        let app = Application::pending(2, 10, "Jane Doe", "123456789", "I like chess").unwrap();
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(app.organization_id, 2);
        assert_eq!(app.user_id, 10);
    }

    #[test]
    fn test_validation_precedence() {
        // Every field is wrong: the name rule wins
        assert_eq!(
            Application::validate_fields("Al", "12", ""),
            Err(DomainError::ApplicantNameTooShort)
        );
        // Name fixed: the id rule is next
        assert_eq!(
            Application::validate_fields("Alice", "12", ""),
            Err(DomainError::InvalidApplicantId)
        );
        // Id fixed: reason is last
        assert_eq!(
            Application::validate_fields("Alice", "123456789", ""),
            Err(DomainError::MissingReason)
        );
        assert!(Application::validate_fields("Alice", "123456789", "fun").is_ok());
    }

    #[test]
    fn test_pid_pattern() {
        assert!(Application::is_valid_pid("000000000"));
        assert!(!Application::is_valid_pid("12345678"));
        assert!(!Application::is_valid_pid("1234567890"));
        assert!(!Application::is_valid_pid("12345678a"));
        assert!(!Application::is_valid_pid(" 12345678"));
    }

    #[test]
    fn test_wire_format() {
        let app = Application::pending(1, 5, "Jane Doe", "123456789", "reason").unwrap();
        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["reason_to_join"], "reason");
        assert_eq!(value["organization_id"], 1);
    }
}
