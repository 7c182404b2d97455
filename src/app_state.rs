//! Implements a struct that holds the state of the server.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{
    Error,
    budget::{BudgetStore, JsonBudgetStore},
    expense::{ExpenseLedger, JsonExpenseLedger},
    timezone::get_local_offset,
};

/// A budget store shared between request handlers.
///
/// The mutex serializes every read and write of the budget files.
pub type SharedBudgetStore = Arc<Mutex<dyn BudgetStore + Send>>;

/// An expense ledger shared between request handlers.
///
/// The mutex serializes every read and write of the ledger file.
pub type SharedExpenseLedger = Arc<Mutex<dyn ExpenseLedger + Send>>;

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The monthly budgets.
    pub budget_store: SharedBudgetStore,

    /// The recorded expenses.
    pub expense_ledger: SharedExpenseLedger,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] that keeps its JSON files in `data_directory`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or the timezone is unknown.
    pub fn new(data_directory: &Path, local_timezone: &str) -> Result<Self, Error> {
        let budget_store = JsonBudgetStore::new(data_directory)?;
        let expense_ledger = JsonExpenseLedger::new(data_directory)?;

        Self::with_stores(budget_store, expense_ledger, local_timezone)
    }

    /// Create a new [AppState] backed by the given stores.
    ///
    /// # Errors
    /// Returns an error if the timezone is unknown.
    pub fn with_stores(
        budget_store: impl BudgetStore + Send + 'static,
        expense_ledger: impl ExpenseLedger + Send + 'static,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            budget_store: Arc::new(Mutex::new(budget_store)),
            expense_ledger: Arc::new(Mutex::new(expense_ledger)),
            local_timezone: local_timezone.to_owned(),
        })
    }
}
