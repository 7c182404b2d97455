//! Joining a month's budget and expenses into per-category spending summaries.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    Error,
    amount::Amount,
    budget::{Budget, BudgetStore},
    category::CategoryName,
    expense::{Expense, ExpenseLedger},
    month::MonthKey,
};

/// How a category's spending compares to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Spent no more than the limit.
    WithinBudget,
    /// Spent more than the limit.
    OverBudget,
    /// The category has expenses but no limit.
    NoBudget,
}

/// The spending of one category in a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    /// The category being summarised.
    pub category: CategoryName,
    /// The category's limit, `None` if no limit is set.
    pub limit: Option<Amount>,
    /// The sum of the category's expenses.
    pub spent: Amount,
    /// `limit - spent`, negative when over budget and `None` if no limit is set.
    pub remaining: Option<Decimal>,
    /// Whether `spent` exceeds the limit, always false if no limit is set.
    pub over_budget: bool,
}

impl CategoryReport {
    fn new(category: CategoryName, limit: Option<Amount>, spent: Amount) -> Self {
        let remaining = limit.map(|limit| limit.value() - spent.value());
        let over_budget = limit.is_some_and(|limit| spent > limit);

        Self {
            category,
            limit,
            spent,
            remaining,
            over_budget,
        }
    }

    /// Whether the category is within, over or without a budget.
    pub fn status(&self) -> BudgetStatus {
        match self.limit {
            None => BudgetStatus::NoBudget,
            Some(_) if self.over_budget => BudgetStatus::OverBudget,
            Some(_) => BudgetStatus::WithinBudget,
        }
    }
}

/// A month's spending compared to its budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The month being summarised.
    pub month: MonthKey,
    /// Every category with a limit or an expense, ordered by name.
    pub categories: Vec<CategoryReport>,
    /// The month's expenses in the order they were recorded.
    pub expenses: Vec<Expense>,
    /// The sum of all limits.
    pub total_limit: Amount,
    /// The sum of all expenses, including those in categories without a limit.
    pub total_spent: Amount,
}

impl Report {
    /// Whether the month has neither a budget nor any expenses.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// The total limit minus the spending in budgeted categories.
    pub fn total_remaining(&self) -> Decimal {
        self.categories
            .iter()
            .filter_map(|category| category.remaining)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// The number of categories that are over budget.
    pub fn over_budget_count(&self) -> usize {
        self.categories
            .iter()
            .filter(|category| category.over_budget)
            .count()
    }
}

/// Summarise `expenses` against `budget`.
///
/// The categories are the union of those with a limit and those with at
/// least one expense.
pub fn build_report(month: MonthKey, budget: &Budget, expenses: Vec<Expense>) -> Report {
    let mut spent_by_category: BTreeMap<&CategoryName, Amount> = BTreeMap::new();

    for expense in &expenses {
        let spent = spent_by_category.entry(&expense.category).or_default();
        *spent = *spent + expense.amount;
    }

    for category in budget.categories() {
        spent_by_category.entry(category).or_default();
    }

    let categories = spent_by_category
        .into_iter()
        .map(|(category, spent)| {
            CategoryReport::new(category.clone(), budget.limit(category.as_ref()), spent)
        })
        .collect::<Vec<_>>();

    let total_spent = expenses.iter().map(|expense| expense.amount).sum();

    Report {
        month,
        categories,
        total_limit: budget.total(),
        total_spent,
        expenses,
    }
}

/// Load the budget and expenses of `month` and summarise them.
///
/// # Errors
///
/// Returns [Error::StorageUnavailable] if either store cannot be read.
pub fn compute_report(
    month: MonthKey,
    budget_store: &(impl BudgetStore + ?Sized),
    expense_ledger: &(impl ExpenseLedger + ?Sized),
) -> Result<Report, Error> {
    let budget = budget_store.get_budget(month)?;
    let expenses = expense_ledger.get_expenses(month)?;

    Ok(build_report(month, &budget, expenses))
}


#[cfg(test)]
mod compute_report_tests {
    use rust_decimal_macros::dec;
    use tempfile::TempDir;
    use time::macros::date;

    use crate::{
        amount::Amount,
        budget::{Budget, BudgetStore, JsonBudgetStore},
        category::CategoryName,
        expense::{Expense, ExpenseLedger, JsonExpenseLedger},
        month::MonthKey,
        report::compute_report,
    };

    fn get_stores() -> (TempDir, JsonBudgetStore, JsonExpenseLedger) {
        let dir = tempfile::tempdir().expect("Could not create temporary directory");
        let budget_store = JsonBudgetStore::new(dir.path()).unwrap();
        let expense_ledger = JsonExpenseLedger::new(dir.path()).unwrap();

        (dir, budget_store, expense_ledger)
    }

    #[test]
    fn joins_stored_budget_and_expenses() {
        let (_dir, mut budget_store, mut expense_ledger) = get_stores();
        let month: MonthKey = "2024-03".parse().unwrap();
        let food = CategoryName::new("Food").unwrap();
        budget_store
            .set_budget(
                month,
                Budget::from_limits([(food.clone(), Amount::new(dec!(100)).unwrap())]).unwrap(),
            )
            .unwrap();
        for (amount, date) in [(dec!(20), date!(2024 - 03 - 01)), (dec!(30), date!(2024 - 03 - 15))] {
            expense_ledger
                .add_expense(
                    month,
                    Expense::new(food.clone(), Amount::new(amount).unwrap(), date),
                )
                .unwrap();
        }

        let report = compute_report(month, &budget_store, &expense_ledger).unwrap();

        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.categories[0].spent.value(), dec!(50));
        assert_eq!(report.categories[0].remaining, Some(dec!(50)));
        assert!(!report.categories[0].over_budget);
        assert_eq!(report.expenses.len(), 2);
    }

    #[test]
    fn repeated_calls_return_identical_reports() {
        let (_dir, mut budget_store, mut expense_ledger) = get_stores();
        let month: MonthKey = "2024-03".parse().unwrap();
        budget_store
            .set_budget(
                month,
                Budget::from_limits([
                    (CategoryName::new("Rent").unwrap(), Amount::new(dec!(900)).unwrap()),
                    (CategoryName::new("Food").unwrap(), Amount::new(dec!(100)).unwrap()),
                ])
                .unwrap(),
            )
            .unwrap();
        expense_ledger
            .add_expense(
                month,
                Expense::new(
                    CategoryName::new("Gifts").unwrap(),
                    Amount::new(dec!(12)).unwrap(),
                    date!(2024 - 03 - 04),
                ),
            )
            .unwrap();

        let first = compute_report(month, &budget_store, &expense_ledger).unwrap();
        let second = compute_report(month, &budget_store, &expense_ledger).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn other_months_do_not_leak_in() {
        let (_dir, budget_store, mut expense_ledger) = get_stores();
        let march: MonthKey = "2024-03".parse().unwrap();
        let april: MonthKey = "2024-04".parse().unwrap();
        expense_ledger
            .add_expense(
                april,
                Expense::new(
                    CategoryName::new("Food").unwrap(),
                    Amount::new(dec!(12)).unwrap(),
                    date!(2024 - 04 - 04),
                ),
            )
            .unwrap();

        let report = compute_report(march, &budget_store, &expense_ledger).unwrap();

        assert!(report.is_empty());
        assert!(report.expenses.is_empty());
    }
}
