//! Product record type.

use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Field names serialize in the authored dataset's camelCase form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier, assigned when the dataset is authored.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Selling price.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Pre-sale price, shown struck through when above `price`.
    #[serde(default, with = "money::decimal::option", skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Average rating, conventionally 0.0 to 5.0.
    pub rating: f64,
    /// Number of reviews.
    pub reviews: u32,
    /// Image URI.
    pub image: String,
    /// Category name (exact match key for filtering).
    pub category: String,
    /// Brand name (exact match key for filtering).
    pub brand: String,
    /// New arrival flag.
    pub is_new: bool,
    /// Authored discount percentage. Informational; not derived from prices.
    pub discount: u8,
    /// Full description.
    pub description: String,
    /// Feature bullet points, in display order.
    #[serde(default)]
    pub features: Vec<String>,
    /// Units in stock.
    pub in_stock: u32,
    /// Colour variants, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    /// Size variants, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
}

impl Product {
    /// Create a product with the required attributes and empty descriptive fields.
    pub fn new(id: u32, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            price,
            original_price: None,
            rating: 0.0,
            reviews: 0,
            image: String::new(),
            category: String::new(),
            brand: String::new(),
            is_new: false,
            discount: 0,
            description: String::new(),
            features: Vec::new(),
            in_stock: 0,
            colors: Vec::new(),
            sizes: Vec::new(),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set the original price and authored discount.
    pub fn with_sale(mut self, original_price: Money, discount: u8) -> Self {
        self.original_price = Some(original_price);
        self.discount = discount;
        self
    }

    /// Mark as a new arrival.
    pub fn new_arrival(mut self) -> Self {
        self.is_new = true;
        self
    }

    /// Check if the product shows a struck-through original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|op| op.amount_cents > self.price.amount_cents)
            .unwrap_or(false)
    }

    /// Amount saved against the original price, if on sale.
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .filter(|_| self.is_on_sale())
            .and_then(|op| op.try_subtract(&self.price))
    }

    /// Check if any units are in stock.
    pub fn is_in_stock(&self) -> bool {
        self.in_stock > 0
    }

    /// Number of filled stars out of five for display.
    pub fn filled_stars(&self) -> usize {
        self.rating.clamp(0.0, 5.0).floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_creation() {
        let product = Product::new(1, "Test Product", Money::usd(2999))
            .with_category("Audio")
            .with_brand("Sony")
            .new_arrival();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.category, "Audio");
        assert!(product.is_new);
        assert!(!product.is_on_sale());
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_product_on_sale() {
        let product = Product::new(1, "Lens", Money::usd(269999)).with_sale(Money::usd(299999), 10);
        assert!(product.is_on_sale());
        assert_eq!(product.savings(), Some(Money::usd(30000)));
    }

    #[test]
    fn test_original_price_below_price_is_not_a_sale() {
        let product = Product::new(1, "Odd", Money::usd(5000)).with_sale(Money::usd(4000), 20);
        assert!(!product.is_on_sale());
        assert_eq!(product.savings(), None);
        // Authored discount is kept as-is.
        assert_eq!(product.discount, 20);
    }

    #[test]
    fn test_filled_stars() {
        assert_eq!(Product::new(1, "a", Money::usd(1)).with_rating(4.9).filled_stars(), 4);
        assert_eq!(Product::new(1, "a", Money::usd(1)).with_rating(7.0).filled_stars(), 5);
    }

    #[test]
    fn test_product_deserializes_authored_shape() {
        let json = r#"{
            "id": 12,
            "name": "AirPods Pro 2nd Gen",
            "price": 249.99,
            "originalPrice": 279.99,
            "rating": 4.7,
            "reviews": 1890,
            "image": "https://example.test/a.jpeg",
            "category": "Audio",
            "brand": "Apple",
            "isNew": true,
            "discount": 11,
            "description": "Noise cancellation.",
            "features": ["Spatial Audio"],
            "inStock": 234,
            "colors": ["White"]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Money::usd(24999));
        assert_eq!(product.original_price, Some(Money::usd(27999)));
        assert!(product.is_new);
        assert!(product.sizes.is_empty());
    }

    #[test]
    fn test_product_rejects_negative_price() {
        let json = r#"{"id":1,"name":"x","price":-1.0,"rating":0,"reviews":0,"image":"",
            "category":"","brand":"","isNew":false,"discount":0,"description":"","inStock":0}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
