//! Monthly Budget is a small web app for setting monthly spending limits per
//! category, recording expenses and comparing the two.
//!
//! This library provides the storage, reporting and HTML pages. Budgets and
//! expenses are kept in JSON files in a data directory:
//! - `<YYYY-MM>.json` maps each category to its limit for that month.
//! - `expenditure.json` maps each `YYYY-MM` month to the list of expenses
//!   recorded in it.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod amount;
mod app_state;
mod budget;
mod category;
mod endpoints;
mod error;
mod expense;
mod home;
mod html;
mod internal_server_error;
mod logging;
mod month;
mod navigation;
mod not_found;
mod report;
mod routing;
mod storage;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use amount::Amount;
pub use app_state::AppState;
pub use budget::{Budget, BudgetStore, JsonBudgetStore};
pub use category::CategoryName;
pub use error::Error;
pub use expense::{Expense, ExpenseLedger, JsonExpenseLedger, LEDGER_FILE_NAME};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::MonthKey;
pub use report::{BudgetStatus, CategoryReport, Report, build_report, compute_report};
pub use routing::build_router;
pub use timezone::get_local_offset;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
