//! The immutable product collection.

use std::collections::HashSet;

use crate::catalog::{CategoryInfo, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Number of leading records shown as featured on the home page.
pub const FEATURED_COUNT: usize = 10;

const SHIPPED_CATALOG: &str = include_str!("../../data/catalog.json");

/// A fixed, ordered collection of products plus the category and brand
/// enumerations the storefront navigates by.
///
/// There are no mutating operations; share it by reference (or behind an
/// `Arc`) with every consumer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Catalog {
    categories: Vec<CategoryInfo>,
    brands: Vec<String>,
    products: Vec<Product>,
}

/// On-disk shape of a catalog document.
#[derive(Deserialize)]
struct CatalogDocument {
    categories: Vec<CategoryInfo>,
    brands: Vec<String>,
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    pub fn new(
        products: Vec<Product>,
        categories: Vec<CategoryInfo>,
        brands: Vec<String>,
    ) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CommerceError::DuplicateProductId(product.id.get()));
            }
        }

        Ok(Self {
            categories,
            brands,
            products,
        })
    }

    /// Parse a catalog document (`categories`, `brands`, `products`).
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let raw: CatalogDocument = serde_json::from_str(json)?;
        Self::new(raw.products, raw.categories, raw.brands)
    }

    /// The dataset bundled with the storefront.
    pub fn shipped() -> Result<Self, CommerceError> {
        let catalog = Self::from_json(SHIPPED_CATALOG)?;
        tracing::debug!(
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            brands = catalog.brands.len(),
            "loaded shipped catalog"
        );
        Ok(catalog)
    }

    /// All products in authored order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a product by id, failing if absent.
    pub fn require(&self, id: ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or(CommerceError::ProductNotFound(id.get()))
    }

    /// Category metadata in authored order.
    pub fn categories(&self) -> &[CategoryInfo] {
        &self.categories
    }

    /// Category names in authored order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Find a category by exact name.
    pub fn category(&self, name: &str) -> Option<&CategoryInfo> {
        self.categories.iter().find(|c| c.matches(name))
    }

    /// Brand names in authored order.
    pub fn brand_names(&self) -> &[String] {
        &self.brands
    }

    /// Number of products in a category.
    pub fn category_count(&self, name: &str) -> usize {
        self.products.iter().filter(|p| p.category == name).count()
    }

    /// Lowest and highest product price, or `None` for an empty catalog.
    pub fn price_bounds(&self) -> Option<(Money, Money)> {
        let min = self.products.iter().map(|p| p.price).min_by_key(|m| m.amount_cents)?;
        let max = self.products.iter().map(|p| p.price).max_by_key(|m| m.amount_cents)?;
        Some((min, max))
    }

    /// The leading records shown on the home page.
    pub fn featured(&self) -> &[Product] {
        let end = self.products.len().min(FEATURED_COUNT);
        &self.products[..end]
    }

    /// Up to `limit` products of a category, highest rated first.
    ///
    /// Ties keep catalog order.
    pub fn top_rated_in(&self, category: &str, limit: usize) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.category == category)
            .collect();
        products.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        products.truncate(limit);
        products
    }
}
