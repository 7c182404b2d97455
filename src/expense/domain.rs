//! Core expense domain types.

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{Error, amount::Amount, category::CategoryName};

/// One recorded expenditure.
///
/// In JSON an expense is written as
/// `{"category": "Food", "amount": 12.5, "date": "2024-03-05"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// What the money was spent on.
    pub category: CategoryName,
    /// How much was spent.
    pub amount: Amount,
    /// When the money was spent.
    pub date: Date,
}

impl Expense {
    /// Create an expense.
    pub fn new(category: CategoryName, amount: Amount, date: Date) -> Self {
        Self {
            category,
            amount,
            date,
        }
    }
}

/// Form data for recording an expense.
///
/// Values are kept as text so that bad input can be reported back to the
/// user instead of being rejected by the extractor.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExpenseForm {
    pub category: String,
    pub amount: String,
    pub date: String,
}

impl ExpenseForm {
    /// Validate the submitted fields.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] if the category is empty, the amount is
    /// not a non-negative number or the date is not of the form `YYYY-MM-DD`.
    pub fn to_expense(&self) -> Result<Expense, Error> {
        let category = CategoryName::new(&self.category)?;
        let amount = self.amount.parse::<Amount>()?;
        let date = parse_date(&self.date)?;

        Ok(Expense::new(category, amount, date))
    }
}

/// Parse a date of the form `YYYY-MM-DD`, as sent by date inputs.
///
/// # Errors
///
/// Returns [Error::InvalidInput] if `text` is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidInput(format!("\"{text}\" is not a date of the form YYYY-MM-DD")))
}

#[cfg(test)]
mod expense_tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        amount::Amount,
        category::CategoryName,
        expense::{Expense, ExpenseForm, parse_date},
    };

    #[test]
    fn json_uses_iso_dates_and_numbers() {
        let expense = Expense::new(
            CategoryName::new("Food").unwrap(),
            Amount::new(dec!(12.5)).unwrap(),
            date!(2024 - 03 - 05),
        );

        let json = serde_json::to_value(&expense).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "category": "Food", "amount": 12.5, "date": "2024-03-05" })
        );
        assert_eq!(serde_json::from_value::<Expense>(json).unwrap(), expense);
    }

    #[test]
    fn form_builds_expense() {
        let form = ExpenseForm {
            category: "Food".to_owned(),
            amount: "20".to_owned(),
            date: "2024-03-05".to_owned(),
        };

        let expense = form.to_expense().unwrap();

        assert_eq!(expense.category.as_ref(), "Food");
        assert_eq!(expense.amount.value(), dec!(20));
        assert_eq!(expense.date, date!(2024 - 03 - 05));
    }

    #[test]
    fn form_rejects_negative_amount() {
        let form = ExpenseForm {
            category: "Food".to_owned(),
            amount: "-5".to_owned(),
            date: "2024-03-05".to_owned(),
        };

        assert!(matches!(form.to_expense(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_malformed_dates() {
        for text in ["", "2024-3-5", "05/03/2024", "2024-02-30"] {
            assert!(
                matches!(parse_date(text), Err(Error::InvalidInput(_))),
                "want InvalidInput for {text:?}"
            );
        }
    }
}
