use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

use super::ValidationError;

// 8-4-4-4-12 hex digits, optionally wrapped in braces
#[allow(clippy::unwrap_used)]
static GUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\{[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\}|[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})$",
    )
    .unwrap()
});

/// Checks that `user_id` is a well-formed GUID and returns its canonical
/// form: lowercase hyphenated, without braces.
///
/// Every spelling of the same GUID maps to one session key.
pub fn validate_user_id(user_id: &str) -> Result<String, ValidationError> {
    if user_id.is_empty() {
        return Err(ValidationError::UserIdEmpty);
    }

    if !GUID_REGEX.is_match(user_id) {
        return Err(ValidationError::UserIdInvalidFormat);
    }

    Uuid::parse_str(user_id)
        .map(|id| id.hyphenated().to_string())
        .map_err(|_| ValidationError::UserIdInvalidFormat)
}
