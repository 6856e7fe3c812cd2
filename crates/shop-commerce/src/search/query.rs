//! Shop listing parameters.

use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::money::Money;
use crate::search::{PriceRange, Selection, ALL};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort options for the shop listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Featured,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// New arrivals before everything else.
    Newest,
}

impl SortOption {
    /// All options in menu order.
    pub const ALL: [SortOption; 5] = [
        SortOption::Featured,
        SortOption::PriceLow,
        SortOption::PriceHigh,
        SortOption::Rating,
        SortOption::Newest,
    ];

    /// Wire key (e.g., "price-low").
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Rating => "rating",
            SortOption::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
            SortOption::Newest => "Newest",
        }
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.as_str() == s)
            .ok_or_else(|| CommerceError::UnknownSortOption(s.to_string()))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which price interval a reset restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetBounds {
    /// `[0, ceiling]`; the ceiling defaults to 3000.
    Fixed(Money),
    /// The catalog's own lowest and highest price.
    Catalog,
}

impl ResetBounds {
    /// Fixed bounds ending at `ceiling`.
    pub fn fixed(ceiling: Money) -> Self {
        ResetBounds::Fixed(ceiling)
    }

    /// Resolve to a concrete range. An empty catalog or a negative ceiling
    /// falls back to `[0, 3000]`.
    pub fn price_range(&self, catalog: &Catalog) -> PriceRange {
        match self {
            ResetBounds::Fixed(ceiling) => PriceRange::new(Money::zero(ceiling.currency), *ceiling)
                .unwrap_or_default(),
            ResetBounds::Catalog => catalog
                .price_bounds()
                .and_then(|(min, max)| PriceRange::new(min, max).ok())
                .unwrap_or_default(),
        }
    }
}

impl Default for ResetBounds {
    fn default() -> Self {
        ResetBounds::Fixed(Money::usd(PriceRange::DEFAULT_CEILING_CENTS))
    }
}

/// The filter and sort parameters of the shop listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShopQuery {
    /// Category filter.
    pub category: Selection,
    /// Brand filter.
    pub brand: Selection,
    /// Inclusive price interval.
    pub price_range: PriceRange,
    /// Result ordering.
    pub sort: SortOption,
}

impl ShopQuery {
    /// Create a query with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category filter (`"All"` clears it).
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Selection::from(category.into());
        self
    }

    /// Set the brand filter (`"All"` clears it).
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Selection::from(brand.into());
        self
    }

    /// Set the price range.
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Default parameters using the given reset bounds.
    pub fn defaults(bounds: ResetBounds, catalog: &Catalog) -> Self {
        Self {
            price_range: bounds.price_range(catalog),
            ..Self::default()
        }
    }

    /// Restore every parameter to its default.
    pub fn reset(&mut self, bounds: ResetBounds, catalog: &Catalog) {
        *self = Self::defaults(bounds, catalog);
    }

    /// Default parameters, with the category seeded from an external value.
    ///
    /// The value must exactly name a catalog category (or be `"All"`);
    /// anything else is ignored.
    pub fn seeded(category: Option<&str>, bounds: ResetBounds, catalog: &Catalog) -> Self {
        let mut query = Self::defaults(bounds, catalog);
        if let Some(value) = category {
            if value == ALL || catalog.category(value).is_some() {
                query.category = Selection::parse(value);
            } else {
                tracing::warn!(category = value, "ignoring unknown category seed");
            }
        }
        query
    }

    /// Default parameters seeded from a navigation query string such as
    /// `category=Mobile` or `?ref=home&category=Photography`.
    pub fn from_query_string(qs: &str, bounds: ResetBounds, catalog: &Catalog) -> Self {
        let category = qs
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "category")
            .map(|(_, value)| decode_component(value));

        Self::seeded(category.as_deref(), bounds, catalog)
    }

    /// Check if a category or brand filter is active.
    pub fn has_active_filters(&self) -> bool {
        !self.category.is_all() || !self.brand.is_all()
    }
}

/// Decode a `application/x-www-form-urlencoded` component.
fn decode_component(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::shipped().unwrap()
    }

    #[test]
    fn test_sort_option_round_trip_keys() {
        for opt in SortOption::ALL {
            assert_eq!(opt.as_str().parse::<SortOption>().unwrap(), opt);
        }
        assert!("cheapest".parse::<SortOption>().is_err());
        assert_eq!(
            serde_json::to_string(&SortOption::PriceHigh).unwrap(),
            "\"price-high\""
        );
    }

    #[test]
    fn test_query_builder() {
        let query = ShopQuery::new()
            .with_category("Mobile")
            .with_brand("All")
            .with_sort(SortOption::PriceLow);

        assert_eq!(query.category, Selection::Exact("Mobile".to_string()));
        assert_eq!(query.brand, Selection::All);
        assert_eq!(query.sort, SortOption::PriceLow);
        assert!(query.has_active_filters());
    }

    #[test]
    fn test_defaults() {
        let query = ShopQuery::new();
        assert_eq!(query.category, Selection::All);
        assert_eq!(query.brand, Selection::All);
        assert_eq!(query.price_range, PriceRange::fixed_default());
        assert_eq!(query.sort, SortOption::Featured);
        assert!(!query.has_active_filters());
    }

    #[test]
    fn test_reset_fixed_and_catalog_bounds() {
        let catalog = catalog();
        let mut query = ShopQuery::new()
            .with_brand("Sony")
            .with_sort(SortOption::Rating)
            .with_price_range(PriceRange::parse("10", "20").unwrap());

        query.reset(ResetBounds::default(), &catalog);
        assert_eq!(query, ShopQuery::new());

        query.reset(ResetBounds::Catalog, &catalog);
        assert_eq!(query.price_range.min(), Money::usd(9999));
        assert_eq!(query.price_range.max(), Money::usd(269999));
    }

    #[test]
    fn test_fixed_bounds_use_their_ceiling() {
        let catalog = catalog();
        let bounds = ResetBounds::fixed(Money::usd(50000));
        let mut query = ShopQuery::defaults(bounds, &catalog);
        assert_eq!(query.price_range, PriceRange::parse("0", "500").unwrap());

        query = query.with_brand("Apple").with_price_range(PriceRange::parse("10", "20").unwrap());
        query.reset(bounds, &catalog);
        assert_eq!(query, ShopQuery::defaults(bounds, &catalog));
        assert_eq!(query.price_range.max(), Money::usd(50000));

        assert_eq!(
            ResetBounds::fixed(Money::usd(-1)).price_range(&catalog),
            PriceRange::fixed_default()
        );
    }

    #[test]
    fn test_catalog_bounds_fall_back_when_empty() {
        let empty = Catalog::new(vec![], vec![], vec![]).unwrap();
        assert_eq!(
            ResetBounds::Catalog.price_range(&empty),
            PriceRange::fixed_default()
        );
    }

    #[test]
    fn test_seeded_category() {
        let catalog = catalog();
        let seeded = ShopQuery::seeded(Some("Photography"), ResetBounds::default(), &catalog);
        assert_eq!(seeded.category, Selection::Exact("Photography".to_string()));

        let lowercase = ShopQuery::seeded(Some("photography"), ResetBounds::default(), &catalog);
        assert_eq!(lowercase.category, Selection::All);

        let none = ShopQuery::seeded(None, ResetBounds::default(), &catalog);
        assert_eq!(none, ShopQuery::new());
    }

    #[test]
    fn test_from_query_string() {
        let catalog = catalog();
        let query = ShopQuery::from_query_string("?ref=home&category=Audio", ResetBounds::default(), &catalog);
        assert_eq!(query.category.as_str(), "Audio");

        let unknown = ShopQuery::from_query_string("category=Toys", ResetBounds::default(), &catalog);
        assert!(unknown.category.is_all());

        let empty = ShopQuery::from_query_string("", ResetBounds::default(), &catalog);
        assert!(empty.category.is_all());
    }

    #[test]
    fn test_query_string_is_percent_decoded() {
        let categories = vec![crate::catalog::CategoryInfo::new("Home Audio", "Speakers")];
        let catalog = Catalog::new(vec![], categories, vec![]).unwrap();

        let encoded = ShopQuery::from_query_string("category=Home%20Audio", ResetBounds::default(), &catalog);
        assert_eq!(encoded.category.as_str(), "Home Audio");

        let plus = ShopQuery::from_query_string("category=Home+Audio", ResetBounds::default(), &catalog);
        assert_eq!(plus.category.as_str(), "Home Audio");
    }
}
