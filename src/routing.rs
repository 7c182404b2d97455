//! Application router configuration.

use std::path::Path;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    budget::{get_set_budget_page, set_budget_endpoint},
    endpoints,
    expense::{add_expense_endpoint, get_add_expense_page},
    home::get_home_page,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    report::get_report_page,
};

/// Return a router with all the app's routes.
///
/// Files in `static_directory` are served under [endpoints::STATIC].
pub fn build_router(state: AppState, static_directory: &Path) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(
            endpoints::SET_BUDGET,
            get(get_set_budget_page).post(set_budget_endpoint),
        )
        .route(
            endpoints::ADD_EXPENSE,
            get(get_add_expense_page).post(add_expense_endpoint),
        )
        .route(endpoints::REPORT, get(get_report_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new(static_directory))
        .fallback(get_404_not_found)
        .with_state(state)
}
