//! Slug rules - URL-safe organization identifiers

/// Check whether a string is a valid slug
///
/// Lowercase ASCII letters, digits, `-` and `_`; never empty.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}
