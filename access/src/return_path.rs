//! Validation of the `from` origin handed back to the login screen.
//!
//! The origin arrives from the query string, so it is attacker-controlled.
//! Only same-origin absolute paths are honoured; anything else falls back to
//! the site root.

#[cfg(test)]
#[path = "return_path_test.rs"]
mod tests;

use crate::policy::ROOT_PATH;

/// True when `path` can only resolve to this origin.
#[must_use]
pub fn is_safe_return_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}

/// Where to send a visitor after sign-in, given the raw `from` value.
#[must_use]
pub fn return_path(raw: Option<&str>) -> &str {
    match raw {
        Some(path) if is_safe_return_path(path) => path,
        _ => ROOT_PATH,
    }
}

/// Decoded `from` parameter of a query string (leading `?` optional).
#[must_use]
pub fn origin_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "from")
        .map(|(_, value)| value.into_owned())
}
