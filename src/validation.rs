use std::sync::OnceLock;
use regex::Regex;
use crate::models::WeatherRequest;

static POSTAL_CODE_RE: OnceLock<Regex> = OnceLock::new();
static USER_RE: OnceLock<Regex> = OnceLock::new();

fn postal_code_regex() -> &'static Regex {
    POSTAL_CODE_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{5}(-[0-9]{4})?$")
            .unwrap_or_else(|e| panic!("postal code regex failed to compile: {}", e))
    })
}

fn user_regex() -> &'static Regex {
    USER_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z]+([ '-][A-Za-z]+)*$")
            .unwrap_or_else(|e| panic!("user regex failed to compile: {}", e))
    })
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns true if the given postal code is a US ZIP code, either 5 digits or ZIP+4
///
/// # Arguments
///
/// * 'postal_code' - postal code to check
pub fn validate_postal_code(postal_code: &str) -> bool {
    !is_blank(postal_code) && postal_code_regex().is_match(postal_code)
}

/// Returns true if the given user name consists of letters, optionally separated
/// by single spaces, apostrophes or hyphens
///
/// # Arguments
///
/// * 'user' - user name to check
pub fn validate_user(user: &str) -> bool {
    !is_blank(user) && user_regex().is_match(user)
}

/// Checks an inbound save request, both fields must be valid
///
/// # Arguments
///
/// * 'request' - the request, None if nothing could be read from the body
pub fn validate_write_request(request: Option<&WeatherRequest>) -> bool {
    match request {
        Some(r) => validate_user(&r.user) && validate_postal_code(&r.postal_code),
        None => false,
    }
}

/// Checks the filters of a history lookup.
///
/// A lookup is readable if at least one filter is valid, or if both are blank in which
/// case everything is listed.
///
/// # Arguments
///
/// * 'user' - user filter, blank if not given
/// * 'postal_code' - postal code filter, blank if not given
pub fn is_readable(user: &str, postal_code: &str) -> bool {
    validate_user(user)
        || validate_postal_code(postal_code)
        || (is_blank(user) && is_blank(postal_code))
}
