//! Core budget domain types.

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

use crate::{Error, amount::Amount, category::CategoryName};

/// The spending limits for each category in one month.
///
/// In JSON a budget is an object mapping category names to numeric limits,
/// e.g. `{"Food": 100.0, "Travel": 50.0}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget {
    limits: BTreeMap<CategoryName, Amount>,
}

impl Budget {
    /// Create a budget with no limits, i.e. "no budget set".
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a budget from category/limit pairs.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] if a category appears more than once.
    pub fn from_limits(
        limits: impl IntoIterator<Item = (CategoryName, Amount)>,
    ) -> Result<Self, Error> {
        let mut budget = Self::new();

        for (category, limit) in limits {
            if budget.limits.contains_key(&category) {
                return Err(Error::InvalidInput(format!(
                    "the category \"{category}\" was given more than once"
                )));
            }

            budget.limits.insert(category, limit);
        }

        Ok(budget)
    }

    /// The limit for `category`, if one is set.
    pub fn limit(&self, category: &str) -> Option<Amount> {
        self.limits.get(category).copied()
    }

    /// The categories and their limits, ordered by category name.
    pub fn iter(&self) -> btree_map::Iter<'_, CategoryName, Amount> {
        self.limits.iter()
    }

    /// The categories with a limit, ordered by name.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryName> {
        self.limits.keys()
    }

    /// Whether no limits are set.
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    /// The number of categories with a limit.
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    /// The sum of all limits.
    pub fn total(&self) -> Amount {
        self.limits.values().sum()
    }
}

impl<'a> IntoIterator for &'a Budget {
    type Item = (&'a CategoryName, &'a Amount);
    type IntoIter = btree_map::Iter<'a, CategoryName, Amount>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Form data for setting a month's budget.
///
/// Categories and limits are submitted as repeated fields and paired up by
/// position. Values are kept as text so that bad input can be reported back
/// to the user instead of being rejected by the extractor.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BudgetForm {
    pub month: String,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub limit: Vec<String>,
}

impl BudgetForm {
    /// The submitted rows as (category, limit) text pairs, in form order.
    ///
    /// A missing trailing field is treated as blank.
    pub fn rows(&self) -> Vec<(String, String)> {
        let row_count = self.category.len().max(self.limit.len());

        (0..row_count)
            .map(|i| {
                (
                    self.category.get(i).cloned().unwrap_or_default(),
                    self.limit.get(i).cloned().unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Validate the submitted rows and build the budget they describe.
    ///
    /// Rows where both the category and the limit are blank are skipped.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] if a row has a limit but no category, a
    /// category without a valid non-negative limit, or if a category appears
    /// twice.
    pub fn to_budget(&self) -> Result<Budget, Error> {
        let mut limits = Vec::new();

        for (category, limit) in self.rows() {
            if category.trim().is_empty() && limit.trim().is_empty() {
                continue;
            }

            let category = CategoryName::new(&category)?;
            let limit = limit.parse::<Amount>().map_err(|error| {
                Error::InvalidInput(format!("invalid limit for \"{category}\": {error}"))
            })?;

            limits.push((category, limit));
        }

        Budget::from_limits(limits)
    }
}
