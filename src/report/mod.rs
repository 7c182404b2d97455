//! Comparing a month's spending against its budget.

mod page;
mod summary;

pub use page::get_report_page;
pub use summary::{BudgetStatus, CategoryReport, Report, build_report, compute_report};
