//! The endpoint URIs.
//!
//! Pages that show one month take the month as a `month=YYYY-MM` query
//! parameter. Use [with_month] to build those links.

use crate::month::MonthKey;

/// The home page with a summary of the current month.
pub const ROOT: &str = "/";
/// The page and form endpoint for setting a month's budget.
pub const SET_BUDGET: &str = "/set-budget";
/// The page and form endpoint for recording an expense.
pub const ADD_EXPENSE: &str = "/add-expense";
/// The page comparing a month's spending to its budget.
pub const REPORT: &str = "/report";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Append `month` to `endpoint_path` as a query parameter, e.g. `/report?month=2024-03`.
pub fn with_month(endpoint_path: &str, month: MonthKey) -> String {
    with_query(endpoint_path, &[("month", month.to_string())])
}

/// Append `params` to `endpoint_path` as a URL encoded query string.
///
/// Returns `endpoint_path` unchanged if `params` is empty or cannot be encoded.
pub fn with_query(endpoint_path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return endpoint_path.to_owned();
    }

    match serde_urlencoded::to_string(params) {
        Ok(query) => format!("{endpoint_path}?{query}"),
        Err(error) => {
            tracing::error!("could not encode query parameters {params:?}: {error}");
            endpoint_path.to_owned()
        }
    }
}
