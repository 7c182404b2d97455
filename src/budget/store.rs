//! Persistence for monthly budgets.

use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    Error,
    budget::Budget,
    month::MonthKey,
    storage::{ensure_directory, read_json, write_json},
};

/// Stores one [Budget] per month.
pub trait BudgetStore: Debug {
    /// Replace the budget for `month` with `budget`.
    ///
    /// Any previously stored limits for `month` are discarded, not merged.
    fn set_budget(&mut self, month: MonthKey, budget: Budget) -> Result<(), Error>;

    /// Get the budget for `month`.
    ///
    /// A month without a stored budget yields an empty budget.
    fn get_budget(&self, month: MonthKey) -> Result<Budget, Error>;

    /// The months that have a stored budget, in chronological order.
    fn budgeted_months(&self) -> Result<Vec<MonthKey>, Error>;
}

/// Keeps each month's budget in its own `<YYYY-MM>.json` file.
#[derive(Debug, Clone)]
pub struct JsonBudgetStore {
    directory: PathBuf,
}

impl JsonBudgetStore {
    /// Create a store that keeps its files in `directory`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [Error::StorageUnavailable] if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, Error> {
        let directory = directory.into();
        ensure_directory(&directory)?;

        Ok(Self { directory })
    }

    /// The path of the file holding the budget for `month`.
    pub fn path_for(&self, month: MonthKey) -> PathBuf {
        self.directory.join(format!("{month}.json"))
    }

    /// The directory holding the budget files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl BudgetStore for JsonBudgetStore {
    fn set_budget(&mut self, month: MonthKey, budget: Budget) -> Result<(), Error> {
        write_json(&self.path_for(month), &budget)?;
        tracing::info!("Saved budget for {month} with {} categories", budget.len());

        Ok(())
    }

    fn get_budget(&self, month: MonthKey) -> Result<Budget, Error> {
        Ok(read_json(&self.path_for(month))?.unwrap_or_default())
    }

    fn budgeted_months(&self) -> Result<Vec<MonthKey>, Error> {
        let entries = fs::read_dir(&self.directory).map_err(|error| {
            tracing::error!("could not list {}: {error}", self.directory.display());
            Error::StorageUnavailable(format!(
                "could not list {}: {error}",
                self.directory.display()
            ))
        })?;

        // Other files, e.g. the expense ledger, share the directory and are skipped.
        let mut months: Vec<MonthKey> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let file_name = entry.file_name();
                let stem = file_name.to_str()?.strip_suffix(".json")?;
                stem.parse().ok()
            })
            .collect();
        months.sort();

        Ok(months)
    }
}

#[cfg(test)]
mod json_budget_store_tests {
    use std::fs;

    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    use crate::{
        Error,
        amount::Amount,
        budget::{Budget, BudgetStore, JsonBudgetStore},
        category::CategoryName,
        month::MonthKey,
    };

    fn get_store() -> (TempDir, JsonBudgetStore) {
        let dir = tempfile::tempdir().expect("Could not create temporary directory");
        let store = JsonBudgetStore::new(dir.path()).expect("Could not create budget store");

        (dir, store)
    }

    fn budget(limits: &[(&str, rust_decimal::Decimal)]) -> Budget {
        Budget::from_limits(limits.iter().map(|(category, limit)| {
            (
                CategoryName::new(category).unwrap(),
                Amount::new(*limit).unwrap(),
            )
        }))
        .unwrap()
    }

    fn month(text: &str) -> MonthKey {
        text.parse().unwrap()
    }

    #[test]
    fn unset_month_has_empty_budget() {
        let (_dir, store) = get_store();

        let got = store.get_budget(month("2024-03"));

        assert_eq!(got, Ok(Budget::new()));
    }

    #[test]
    fn set_then_get_returns_budget() {
        let (_dir, mut store) = get_store();
        let want = budget(&[("Food", dec!(100))]);

        store.set_budget(month("2024-03"), want.clone()).unwrap();

        assert_eq!(store.get_budget(month("2024-03")), Ok(want));
    }

    #[test]
    fn set_replaces_previous_budget() {
        let (_dir, mut store) = get_store();
        store
            .set_budget(month("2024-03"), budget(&[("Food", dec!(100))]))
            .unwrap();

        store
            .set_budget(month("2024-03"), budget(&[("Travel", dec!(50))]))
            .unwrap();

        let got = store.get_budget(month("2024-03")).unwrap();
        assert_eq!(got, budget(&[("Travel", dec!(50))]));
        assert_eq!(got.limit("Food"), None);
    }

    #[test]
    fn months_are_independent() {
        let (_dir, mut store) = get_store();
        store
            .set_budget(month("2024-03"), budget(&[("Food", dec!(100))]))
            .unwrap();

        assert_eq!(store.get_budget(month("2024-04")), Ok(Budget::new()));
    }

    #[test]
    fn writes_one_file_per_month() {
        let (dir, mut store) = get_store();

        store
            .set_budget(month("2024-03"), budget(&[("Food", dec!(100))]))
            .unwrap();

        let text = fs::read_to_string(dir.path().join("2024-03.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json, serde_json::json!({ "Food": 100.0 }));
    }

    #[test]
    fn budget_survives_reopening_store() {
        let (dir, mut store) = get_store();
        let want = budget(&[("Food", dec!(100)), ("Rent", dec!(950.25))]);
        store.set_budget(month("2024-03"), want.clone()).unwrap();

        let reopened = JsonBudgetStore::new(dir.path()).unwrap();

        assert_eq!(reopened.get_budget(month("2024-03")), Ok(want));
    }

    #[test]
    fn reads_hand_written_file() {
        let (dir, store) = get_store();
        fs::write(dir.path().join("2024-03.json"), r#"{"Food": 100, "Fun": 20.5}"#).unwrap();

        let got = store.get_budget(month("2024-03")).unwrap();

        assert_eq!(got, budget(&[("Food", dec!(100)), ("Fun", dec!(20.5))]));
    }

    #[test]
    fn negative_limit_on_disk_is_a_storage_error() {
        let (dir, store) = get_store();
        fs::write(dir.path().join("2024-03.json"), r#"{"Food": -1}"#).unwrap();

        let got = store.get_budget(month("2024-03"));

        assert!(matches!(got, Err(Error::StorageUnavailable(_))));
    }

    #[test]
    fn lists_budgeted_months_in_order() {
        let (dir, mut store) = get_store();
        store.set_budget(month("2024-04"), Budget::new()).unwrap();
        store.set_budget(month("2023-12"), Budget::new()).unwrap();
        fs::write(dir.path().join("expenditure.json"), "{}").unwrap();

        let got = store.budgeted_months().unwrap();

        assert_eq!(got, vec![month("2023-12"), month("2024-04")]);
    }

    #[test]
    fn repeated_reads_are_identical() {
        let (_dir, mut store) = get_store();
        store
            .set_budget(month("2024-03"), budget(&[("Food", dec!(100))]))
            .unwrap();

        let first = store.get_budget(month("2024-03")).unwrap();
        let second = store.get_budget(month("2024-03")).unwrap();

        assert_eq!(first, second);
    }
}
