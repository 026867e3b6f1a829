//! Email and bare-domain recognition for block list entries.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

// A label needs at least three characters: two boundary characters plus one
// in the middle.
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}$")
        .expect("valid domain regex")
});

/// Returns `true` when `value` is an email address or a bare domain.
///
/// No normalization is applied: the value is checked exactly as given.
pub fn is_valid_entry(value: &str) -> bool {
    !value.is_empty() && (EMAIL_PATTERN.is_match(value) || DOMAIN_PATTERN.is_match(value))
}

/// Same as [`is_valid_entry`] for values that may be missing from a form.
pub fn is_valid_optional_entry(value: Option<&str>) -> bool {
    value.is_some_and(is_valid_entry)
}
