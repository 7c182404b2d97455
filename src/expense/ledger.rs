//! Persistence for recorded expenses.

use std::{
    collections::BTreeMap,
    fmt::Debug,
    path::{Path, PathBuf},
};

use crate::{
    Error,
    expense::Expense,
    month::MonthKey,
    storage::{ensure_directory, read_json, write_json},
};

/// The name of the file holding every month's expenses.
pub const LEDGER_FILE_NAME: &str = "expenditure.json";

/// The expenses of every month, each month in the order they were recorded.
type LedgerDocument = BTreeMap<MonthKey, Vec<Expense>>;

/// An append-only record of expenses grouped by month.
pub trait ExpenseLedger: Debug {
    /// Append `expense` to the expenses of `month`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] if the expense's date is not in `month`,
    /// in which case nothing is recorded.
    fn add_expense(&mut self, month: MonthKey, expense: Expense) -> Result<(), Error>;

    /// The expenses of `month` in the order they were recorded.
    ///
    /// A month without expenses yields an empty list.
    fn get_expenses(&self, month: MonthKey) -> Result<Vec<Expense>, Error>;

    /// The months that have at least one expense, in chronological order.
    fn months(&self) -> Result<Vec<MonthKey>, Error>;
}

/// Keeps every month's expenses in a single JSON file mapping `YYYY-MM` to a
/// list of expenses.
#[derive(Debug, Clone)]
pub struct JsonExpenseLedger {
    path: PathBuf,
}

impl JsonExpenseLedger {
    /// Create a ledger stored in [LEDGER_FILE_NAME] inside `directory`,
    /// creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [Error::StorageUnavailable] if the directory cannot be created.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, Error> {
        let directory = directory.as_ref();
        ensure_directory(directory)?;

        Ok(Self {
            path: directory.join(LEDGER_FILE_NAME),
        })
    }

    /// The path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<LedgerDocument, Error> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }
}

impl ExpenseLedger for JsonExpenseLedger {
    fn add_expense(&mut self, month: MonthKey, expense: Expense) -> Result<(), Error> {
        if !month.contains(expense.date) {
            return Err(Error::InvalidInput(format!(
                "the date {} is not in {}",
                expense.date,
                month.label()
            )));
        }

        let mut document = self.load()?;
        tracing::info!(
            "Recording expense of {} for {} on {}",
            expense.amount,
            expense.category,
            expense.date
        );
        document.entry(month).or_default().push(expense);

        write_json(&self.path, &document)
    }

    fn get_expenses(&self, month: MonthKey) -> Result<Vec<Expense>, Error> {
        Ok(self.load()?.remove(&month).unwrap_or_default())
    }

    fn months(&self) -> Result<Vec<MonthKey>, Error> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|(_, expenses)| !expenses.is_empty())
            .map(|(month, _)| month)
            .collect())
    }
}
