//! Catalog query evaluation.
//!
//! Everything here is a pure function of the catalog and the parameters:
//! the same inputs always yield the same sequence.

use crate::catalog::{Catalog, Product};
use crate::search::{Facet, ShopQuery, SortOption, ALL};

/// Check whether a product passes every filter of a query.
///
/// Category, brand and price predicates are conjunctive.
pub fn matches(product: &Product, query: &ShopQuery) -> bool {
    query.category.matches(&product.category)
        && query.brand.matches(&product.brand)
        && query.price_range.contains(product.price)
}

/// Run a query against the catalog, returning the matching products in
/// display order.
///
/// The full result is returned; callers that page it do so afterwards.
/// An empty result is not an error.
pub fn run_query<'a>(catalog: &'a Catalog, query: &ShopQuery) -> Vec<&'a Product> {
    let mut results: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| matches(p, query))
        .collect();

    sort_products(&mut results, query.sort);

    tracing::debug!(
        category = %query.category,
        brand = %query.brand,
        price_range = %query.price_range,
        sort = %query.sort,
        matched = results.len(),
        "catalog query evaluated"
    );

    results
}

/// Order products in place. All orderings are stable, so ties keep their
/// catalog order.
pub fn sort_products(products: &mut [&Product], sort: SortOption) {
    match sort {
        SortOption::Featured => {}
        SortOption::PriceLow => products.sort_by_key(|p| p.price.amount_cents),
        SortOption::PriceHigh => {
            products.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
        }
        SortOption::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        // Boolean partition: `true` sorts before `false`.
        SortOption::Newest => products.sort_by_key(|p| !p.is_new),
    }
}

/// Sidebar counts for the category and brand filters.
///
/// Each dimension counts the products matching every *other* active
/// filter, so a count tells the user what selecting that value would show.
#[derive(Debug, Clone, PartialEq)]
pub struct Facets {
    /// Category facet, led by the "All" entry.
    pub categories: Facet,
    /// Brand facet, led by the "All" entry.
    pub brands: Facet,
}

impl Facets {
    /// Compute facets for a query.
    pub fn compute(catalog: &Catalog, query: &ShopQuery) -> Self {
        let without_category = ShopQuery {
            category: Default::default(),
            ..query.clone()
        };
        let without_brand = ShopQuery {
            brand: Default::default(),
            ..query.clone()
        };

        let mut categories = Facet::terms("Categories", "category");
        let in_scope: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|p| matches(p, &without_category))
            .collect();
        categories.add_value(ALL, in_scope.len(), query.category.is_all());
        for name in catalog.category_names() {
            let count = in_scope.iter().filter(|p| p.category == name).count();
            categories.add_value(name, count, query.category.as_str() == name);
        }

        let mut brands = Facet::terms("Brands", "brand");
        let in_scope: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|p| matches(p, &without_brand))
            .collect();
        brands.add_value(ALL, in_scope.len(), query.brand.is_all());
        for name in catalog.brand_names() {
            let count = in_scope.iter().filter(|p| &p.brand == name).count();
            brands.add_value(name.as_str(), count, query.brand.as_str() == name);
        }

        Self { categories, brands }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn sample() -> Catalog {
        let products = vec![
            Product::new(1, "A", Money::usd(500)).with_rating(4.0),
            Product::new(2, "B", Money::usd(300)).with_rating(4.5).new_arrival(),
            Product::new(3, "C", Money::usd(500)).with_rating(4.5),
            Product::new(4, "D", Money::usd(100)).with_rating(4.0).new_arrival(),
        ];
        Catalog::new(products, vec![], vec![]).unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_featured_keeps_order() {
        let catalog = sample();
        let results = run_query(&catalog, &ShopQuery::new());
        assert_eq!(ids(&results), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_price_sorts_are_stable() {
        let catalog = sample();
        let low = run_query(&catalog, &ShopQuery::new().with_sort(SortOption::PriceLow));
        assert_eq!(ids(&low), vec![4, 2, 1, 3]);

        let high = run_query(&catalog, &ShopQuery::new().with_sort(SortOption::PriceHigh));
        assert_eq!(ids(&high), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_rating_sort_is_stable() {
        let catalog = sample();
        let results = run_query(&catalog, &ShopQuery::new().with_sort(SortOption::Rating));
        assert_eq!(ids(&results), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_newest_is_a_partition() {
        let catalog = sample();
        let results = run_query(&catalog, &ShopQuery::new().with_sort(SortOption::Newest));
        assert_eq!(ids(&results), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(vec![], vec![], vec![]).unwrap();
        assert!(run_query(&catalog, &ShopQuery::new()).is_empty());
    }

    #[test]
    fn test_facets_ignore_own_dimension() {
        let catalog = Catalog::shipped().unwrap();
        let query = ShopQuery::new().with_category("Mobile").with_brand("Apple");
        let facets = Facets::compute(&catalog, &query);

        // Apple products across all categories: 4.
        let all_categories = &facets.categories.values[0];
        assert_eq!(all_categories.value, "All");
        assert_eq!(all_categories.count, 4);
        assert!(!all_categories.selected);

        let mobile = facets
            .categories
            .values
            .iter()
            .find(|v| v.value == "Mobile")
            .unwrap();
        assert_eq!(mobile.count, 1);
        assert!(mobile.selected);

        // Mobile products across all brands: 4, one each.
        assert_eq!(facets.brands.values[0].count, 4);
        let samsung = facets.brands.values.iter().find(|v| v.value == "Samsung").unwrap();
        assert_eq!(samsung.count, 1);
        assert!(!samsung.selected);
    }
}
