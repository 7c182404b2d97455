//! Validated, non-negative money amounts.

use std::{fmt::Display, iter::Sum, ops::Add, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A non-negative amount of money, e.g. a budget limit or the cost of an expense.
///
/// Amounts use decimal arithmetic so that sums of cents are exact.
/// In JSON an amount is written as a plain number, so amounts are limited to
/// [Amount::MAX_WHOLE_UNITS] and [Amount::MAX_DECIMAL_PLACES] to keep that number exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// The largest amount accepted, in whole units.
    pub const MAX_WHOLE_UNITS: i64 = 1_000_000_000_000;

    /// The most digits accepted after the decimal point.
    pub const MAX_DECIMAL_PLACES: u32 = 2;

    /// Create an amount.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] if `value` is negative, larger than
    /// [Amount::MAX_WHOLE_UNITS] or has more than [Amount::MAX_DECIMAL_PLACES]
    /// decimal places.
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(Error::InvalidInput(format!(
                "the amount {value} is negative, amounts must be zero or more"
            )));
        }

        if value > Decimal::from(Self::MAX_WHOLE_UNITS) {
            return Err(Error::InvalidInput(format!(
                "the amount {value} is too large, amounts must be at most {}",
                Self::MAX_WHOLE_UNITS
            )));
        }

        if value.normalize().scale() > Self::MAX_DECIMAL_PLACES {
            return Err(Error::InvalidInput(format!(
                "the amount {value} has more than {} decimal places",
                Self::MAX_DECIMAL_PLACES
            )));
        }

        // Normalise so "-0" and "0.0" compare equal to zero.
        Ok(Self(value.abs()))
    }

    /// The amount as a decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = Error;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Parse an amount from user input such as "12.50".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();

        if text.is_empty() {
            return Err(Error::InvalidInput("an amount is required".to_owned()));
        }

        let value = Decimal::from_str(text)
            .map_err(|_| Error::InvalidInput(format!("\"{text}\" is not a number")))?;

        Amount::new(value)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    /// Sums are not re-checked against [Amount::MAX_WHOLE_UNITS], they are
    /// only written to pages. Adding saturates instead of panicking.
    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
