//! Recording expenses and keeping them in the ledger.

mod domain;
mod ledger;
mod page;

pub use domain::{Expense, ExpenseForm};
pub use ledger::{ExpenseLedger, JsonExpenseLedger, LEDGER_FILE_NAME};
pub use page::{add_expense_endpoint, get_add_expense_page};

#[cfg(test)]
pub use domain::parse_date;
