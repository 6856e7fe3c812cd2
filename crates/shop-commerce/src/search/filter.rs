//! Search filter types.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel filter value meaning "no restriction on this dimension".
pub const ALL: &str = "All";

/// A single-valued filter over a string attribute (category or brand).
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// No restriction.
    #[default]
    All,
    /// Only records whose attribute equals this value.
    Exact(String),
}

impl Selection {
    /// Parse a raw filter value; the literal `"All"` is the sentinel.
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Exact(value.to_string())
        }
    }

    /// Check if an attribute value passes this filter.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Exact(expected) => expected == value,
        }
    }

    /// Check if this is the sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// The raw value, `"All"` for the sentinel.
    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Exact(value) => value,
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Exact(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::parse(value)
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => ALL.to_string(),
            Selection::Exact(value) => value,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed price interval `[min, max]` with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(Money, Money)", into = "(Money, Money)")]
pub struct PriceRange {
    min: Money,
    max: Money,
}

impl PriceRange {
    /// Upper bound of the fixed default range, in cents ($3000).
    pub const DEFAULT_CEILING_CENTS: i64 = 300_000;

    /// Create a range, rejecting `min > max`.
    pub fn new(min: Money, max: Money) -> Result<Self, CommerceError> {
        if min.amount_cents > max.amount_cents {
            return Err(CommerceError::InvalidPriceRange {
                min: min.display(),
                max: max.display(),
            });
        }
        Ok(Self { min, max })
    }

    /// The fixed `[0, 3000]` range the storefront resets to.
    pub const fn fixed_default() -> Self {
        Self {
            min: Money::zero(Currency::USD),
            max: Money::usd(Self::DEFAULT_CEILING_CENTS),
        }
    }

    /// Parse bounds from decimal strings such as `"0"` and `"249.99"`.
    pub fn parse(min: &str, max: &str) -> Result<Self, CommerceError> {
        Self::new(
            Money::parse(min, Currency::USD)?,
            Money::parse(max, Currency::USD)?,
        )
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> Money {
        self.min
    }

    /// Upper bound (inclusive).
    pub fn max(&self) -> Money {
        self.max
    }

    /// Check if a price falls inside the range, both ends inclusive.
    pub fn contains(&self, price: Money) -> bool {
        self.min.amount_cents <= price.amount_cents && price.amount_cents <= self.max.amount_cents
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::fixed_default()
    }
}

impl TryFrom<(Money, Money)> for PriceRange {
    type Error = CommerceError;

    fn try_from((min, max): (Money, Money)) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<PriceRange> for (Money, Money) {
    fn from(range: PriceRange) -> Self {
        (range.min, range.max)
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_sentinel() {
        assert_eq!(Selection::parse("All"), Selection::All);
        assert_eq!(Selection::parse("all"), Selection::Exact("all".to_string()));
        assert!(Selection::All.matches("anything"));
    }

    #[test]
    fn test_selection_exact_match() {
        let sel = Selection::parse("Mobile");
        assert!(sel.matches("Mobile"));
        assert!(!sel.matches("mobile"));
        assert!(!sel.matches("Mobiles"));
        assert_eq!(sel.as_str(), "Mobile");
    }

    #[test]
    fn test_selection_serializes_as_string() {
        assert_eq!(serde_json::to_string(&Selection::All).unwrap(), "\"All\"");
        let sel: Selection = serde_json::from_str("\"Apple\"").unwrap();
        assert_eq!(sel, Selection::Exact("Apple".to_string()));
    }

    #[test]
    fn test_price_range_inclusive() {
        let range = PriceRange::new(Money::usd(10000), Money::usd(20000)).unwrap();
        assert!(range.contains(Money::usd(10000)));
        assert!(range.contains(Money::usd(20000)));
        assert!(!range.contains(Money::usd(9999)));
        assert!(!range.contains(Money::usd(20001)));
    }

    #[test]
    fn test_price_range_rejects_inverted_bounds() {
        assert!(PriceRange::new(Money::usd(200), Money::usd(100)).is_err());
        assert!(PriceRange::parse("500", "100").is_err());
        // Degenerate single-point range is allowed.
        assert!(PriceRange::new(Money::usd(100), Money::usd(100)).is_ok());
    }

    #[test]
    fn test_price_range_deserialize_validates() {
        let bad = r#"[{"amount_cents":500,"currency":"USD"},{"amount_cents":100,"currency":"USD"}]"#;
        assert!(serde_json::from_str::<PriceRange>(bad).is_err());
    }

    #[test]
    fn test_default_range() {
        let range = PriceRange::default();
        assert_eq!(range.min(), Money::usd(0));
        assert_eq!(range.max(), Money::usd(300000));
    }
}
