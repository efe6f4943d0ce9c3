use crate::validation::{validate_postal_code, validate_user};

/// Which history query to run against the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryQuery {
    UserAndPostalCode { user: String, postal_code: String },
    User(String),
    PostalCode(String),
    All,
}

/// Picks the history query for the given filters.
///
/// Combined filtering always wins over a single filter when both are valid, a filter
/// that doesn't validate is ignored, and with no valid filter everything is returned.
///
/// # Arguments
///
/// * 'user' - user filter, blank if not given
/// * 'postal_code' - postal code filter, blank if not given
pub fn select_query(user: &str, postal_code: &str) -> HistoryQuery {
    match (validate_user(user), validate_postal_code(postal_code)) {
        (true, true) => HistoryQuery::UserAndPostalCode {
            user: user.to_string(),
            postal_code: postal_code.to_string(),
        },
        (true, false) => HistoryQuery::User(user.to_string()),
        (false, true) => HistoryQuery::PostalCode(postal_code.to_string()),
        (false, false) => HistoryQuery::All,
    }
}
