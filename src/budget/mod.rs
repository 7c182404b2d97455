//! Monthly budgets: the spending limit for each category in a month.

mod domain;
mod page;
mod store;

pub use domain::{Budget, BudgetForm};
pub use page::{get_set_budget_page, set_budget_endpoint};
pub use store::{BudgetStore, JsonBudgetStore};
