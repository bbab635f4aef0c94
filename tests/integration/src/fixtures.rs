//! Test fixtures
//!
//! Onyens of the seeded users and payloads for new records.

use org_core::Organization;

/// Administrator
pub const ROOT: &str = "root";
/// Member of cssg
pub const SALLY: &str = "user";
/// Leader of cssg
pub const LAMBDA: &str = "lambda";
/// Leader of acm
pub const PAUL: &str = "paul";
/// Member of nothing
pub const STEWIE: &str = "stewie";

/// Organization that is not seeded
pub fn chess_club() -> Organization {
    Organization {
        short_description: "Weekly games and tournaments.".to_string(),
        ..Organization::new("Chess Club", "chess", "CC", "https://example.com/chess.png")
    }
}
