//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so price filters and cart
//! totals compare exactly instead of drifting with floating point.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Supported currencies. The storefront prices in US dollars only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a USD value from cents.
    pub const fn usd(amount_cents: i64) -> Self {
        Self::new(amount_cents, Currency::USD)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use shop_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(1199.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 119999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// Parse a user-supplied decimal amount such as `"249.99"` or `"$3000"`.
    ///
    /// Negative and non-finite amounts are rejected.
    pub fn parse(input: &str, currency: Currency) -> Result<Self, CommerceError> {
        let trimmed = input.trim().trim_start_matches(currency.symbol());
        let amount: f64 = trimmed
            .parse()
            .map_err(|_| CommerceError::InvalidPrice(input.to_string()))?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(CommerceError::InvalidPrice(input.to_string()));
        }
        Ok(Self::from_decimal(amount, currency))
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_sub(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Multiply by a decimal factor (e.g., for percentages).
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        let new_amount = (self.amount_cents as f64 * factor).round() as i64;
        Money::new(new_amount, self.currency)
    }

    /// Calculate a percentage of this amount.
    pub fn percentage(&self, percent: f64) -> Money {
        self.multiply_decimal(percent / 100.0)
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics on overflow or currency mismatch. Use `try_add` for fallible addition.
    fn add(self, other: Money) -> Money {
        self.try_add(&other)
            .expect("Money overflow or currency mismatch in addition")
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        self.try_subtract(&other)
            .expect("Money overflow or currency mismatch in subtraction")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter for authored decimal prices (`1199.99`) held as USD cents.
///
/// Use with `#[serde(with = "crate::money::decimal")]`.
pub mod decimal {
    use super::{Currency, Money};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(D::Error::custom(format!("invalid price {amount}")));
        }
        Ok(Money::from_decimal(amount, Currency::USD))
    }

    /// Same as the parent module, for optional prices.
    pub mod option {
        use super::super::Money;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            money: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(m) => serializer.serialize_some(&m.to_decimal()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "super")] Money);

            Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(m)| m))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99, Currency::USD).amount_cents, 4999);
        assert_eq!(Money::from_decimal(1099.99, Currency::USD).amount_cents, 109999);
    }

    #[test]
    fn test_money_parse() {
        assert_eq!(Money::parse("3000", Currency::USD).unwrap(), Money::usd(300000));
        assert_eq!(Money::parse("$249.99", Currency::USD).unwrap(), Money::usd(24999));
        assert!(Money::parse("-1", Currency::USD).is_err());
        assert!(Money::parse("cheap", Currency::USD).is_err());
        assert!(Money::parse("NaN", Currency::USD).is_err());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::usd(4999).display(), "$49.99");
        assert_eq!(Money::usd(119999).display(), "$1199.99");
        assert_eq!(Money::usd(5).display(), "$0.05");
        assert_eq!(Money::usd(-999).display_amount(), "-9.99");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::usd(1000);
        let b = Money::usd(300);
        assert_eq!((a + b).amount_cents, 1300);
        assert_eq!((a - b).amount_cents, 700);
        assert_eq!(a.try_multiply(3), Some(Money::usd(3000)));
        assert_eq!(a.try_multiply(i64::MAX), None);
    }

    #[test]
    fn test_money_percentage() {
        let m = Money::usd(10000);
        assert_eq!(m.percentage(10.0).amount_cents, 1000);
    }

    #[test]
    fn test_try_sum() {
        let values = [Money::usd(100), Money::usd(250)];
        assert_eq!(Money::try_sum(values.iter(), Currency::USD), Some(Money::usd(350)));

        let huge = [Money::usd(i64::MAX), Money::usd(1)];
        assert_eq!(Money::try_sum(huge.iter(), Currency::USD), None);
    }

    #[test]
    fn test_try_add_overflow() {
        assert_eq!(Money::usd(i64::MAX).try_add(&Money::usd(1)), None);
        assert_eq!(Money::usd(i64::MIN).try_subtract(&Money::usd(1)), None);
        assert_eq!(Money::usd(1).try_add(&Money::usd(2)), Some(Money::usd(3)));
    }

    #[test]
    #[should_panic(expected = "Money overflow")]
    fn test_money_add_overflow_panics() {
        let _ = Money::usd(i64::MAX) + Money::usd(1);
    }

    #[test]
    fn test_currency_code() {
        assert_eq!(Currency::USD.code(), "USD");
        assert_eq!(Currency::USD.to_string(), "USD");
    }
}
