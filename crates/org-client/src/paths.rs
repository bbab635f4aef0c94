//! REST paths of the organizations backend

pub const ORGANIZATIONS: &str = "/api/organizations";
pub const APPLICATIONS: &str = "/api/organizations/applications";
pub const PROFILE: &str = "/api/profile";

pub fn organization(slug: &str) -> String {
    format!("{ORGANIZATIONS}/{slug}")
}

pub fn members(slug: &str) -> String {
    format!("{ORGANIZATIONS}/{slug}/members")
}

pub fn status(slug: &str) -> String {
    format!("{ORGANIZATIONS}/{slug}/status")
}

pub fn add_membership(slug: &str, onyen: &str) -> String {
    format!("{ORGANIZATIONS}/{slug}/add_membership/{onyen}")
}

pub fn remove_membership(slug: &str, onyen: &str) -> String {
    format!("{ORGANIZATIONS}/{slug}/remove_membership/{onyen}")
}

pub fn authleader(slug: &str, onyen: &str) -> String {
    format!("{ORGANIZATIONS}/{slug}/{onyen}/authleader")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(organization("acm"), "/api/organizations/acm");
        assert_eq!(members("acm"), "/api/organizations/acm/members");
        assert_eq!(
            add_membership("acm", "jdoe"),
            "/api/organizations/acm/add_membership/jdoe"
        );
        assert_eq!(
            remove_membership("acm", "jdoe"),
            "/api/organizations/acm/remove_membership/jdoe"
        );
        assert_eq!(authleader("acm", "jdoe"), "/api/organizations/acm/jdoe/authleader");
        assert_eq!(status("acm"), "/api/organizations/acm/status");
    }
}
