//! Cart and line item types.

use crate::cart::{CartPricing, PricingRules, PromoCode};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 99;

/// A shopping cart.
///
/// Held in view state only; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    /// Items in the cart, in insertion order.
    pub items: Vec<LineItem>,
    /// Applied promo code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo: Option<PromoCode>,
    /// Cart currency.
    #[serde(default)]
    pub currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample cart the cart page opens with.
    pub fn demo() -> Self {
        let items = vec![
            LineItem::new(1, "Premium Wireless Headphones", Money::usd(29999), 1)
                .with_original_price(Money::usd(39999))
                .with_color("Black"),
            LineItem::new(2, "Smart Fitness Watch", Money::usd(19999), 2)
                .with_original_price(Money::usd(24999))
                .with_color("Silver")
                .with_size("42mm"),
            LineItem::new(3, "Gaming Mechanical Keyboard", Money::usd(12999), 1)
                .with_original_price(Money::usd(17999))
                .with_color("RGB"),
        ];
        Self {
            items,
            ..Self::default()
        }
    }

    /// Add a catalog product to the cart.
    ///
    /// Adding a product already in the cart increases its quantity.
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            tracing::info!(product = %product.id, quantity = new_quantity, "cart quantity increased");
            return Ok(());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        self.items.push(LineItem::from_product(product, quantity));
        tracing::info!(product = %product.id, quantity, "added to cart");
        Ok(())
    }

    /// Change an item's quantity by `delta`.
    ///
    /// The quantity never drops below zero, and an item that reaches zero is
    /// removed. Returns the new quantity.
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) -> Result<i64, CommerceError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id.get()))?;

        let quantity = item.quantity.saturating_add(delta).max(0);
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        item.quantity = quantity;
        if quantity == 0 {
            self.items.retain(|i| i.product_id != product_id);
            tracing::info!(product = %product_id, "removed from cart");
        }
        Ok(quantity)
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        let removed = self.items.len() < len_before;
        if removed {
            tracing::info!(product = %product_id, "removed from cart");
        }
        removed
    }

    /// Clear all items and the promo code.
    pub fn clear(&mut self) {
        self.items.clear();
        self.promo = None;
    }

    /// Apply a validated promo code, replacing any previous one.
    pub fn apply_promo(&mut self, promo: PromoCode) {
        tracing::info!(code = promo.code(), "promo code applied");
        self.promo = Some(promo);
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by product ID.
    pub fn get_item(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Calculate cart pricing under the given rules.
    ///
    /// Returns error if arithmetic overflow occurs.
    pub fn calculate_pricing(&self, rules: &PricingRules) -> Result<CartPricing, CommerceError> {
        let line_totals = self
            .items
            .iter()
            .map(LineItem::total_price)
            .collect::<Result<Vec<_>, _>>()?;
        let subtotal =
            Money::try_sum(line_totals.iter(), self.currency).ok_or(CommerceError::Overflow)?;

        let line_savings = self
            .items
            .iter()
            .map(LineItem::savings)
            .collect::<Result<Vec<_>, _>>()?;
        let savings =
            Money::try_sum(line_savings.iter(), self.currency).ok_or(CommerceError::Overflow)?;

        let promo_discount = self
            .promo
            .map(|promo| promo.discount(&subtotal))
            .unwrap_or_else(|| Money::zero(self.currency));

        CartPricing::calculate(subtotal, savings, promo_discount, rules)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Pre-sale unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Quantity.
    pub quantity: i64,
    /// Selected colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Selected size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(id: u32, name: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        Self {
            product_id: ProductId::new(id),
            name: name.into(),
            unit_price,
            original_price: None,
            quantity,
            color: None,
            size: None,
        }
    }

    /// Create a line for a catalog product, preselecting its first colour and size.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            original_price: product.original_price,
            quantity,
            color: product.colors.first().cloned(),
            size: product.sizes.first().cloned(),
        }
    }

    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Unit price times quantity.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    /// `(original - price) * quantity`, zero without an original price.
    pub fn savings(&self) -> Result<Money, CommerceError> {
        let original = self.original_price.unwrap_or(self.unit_price);
        original
            .try_subtract(&self.unit_price)
            .and_then(|per_unit| per_unit.try_multiply(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, cents: i64) -> Product {
        Product::new(id, format!("Product {id}"), Money::usd(cents))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_demo_cart() {
        let cart = Cart::demo();
        assert_eq!(cart.unique_item_count(), 3);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(
            cart.get_item(ProductId::new(2)).unwrap().size.as_deref(),
            Some("42mm")
        );
    }

    #[test]
    fn test_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let p = product(6, 9999);
        cart.add_product(&p, 1).unwrap();
        cart.add_product(&p, 2).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_update_quantity_removes_at_zero() {
        let mut cart = Cart::demo();
        let id = ProductId::new(1);

        assert_eq!(cart.update_quantity(id, 2).unwrap(), 3);
        assert_eq!(cart.update_quantity(id, -5).unwrap(), 0);
        assert!(cart.get_item(id).is_none());
        assert_eq!(cart.unique_item_count(), 2);
    }

    #[test]
    fn test_update_missing_item() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.update_quantity(ProductId::new(5), 1).unwrap_err(),
            CommerceError::ItemNotInCart(5)
        );
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::demo();
        assert!(cart.remove_item(ProductId::new(3)));
        assert!(!cart.remove_item(ProductId::new(3)));
        assert_eq!(cart.unique_item_count(), 2);
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new();
        let p = product(1, 100);
        assert!(cart.add_product(&p, MAX_QUANTITY_PER_ITEM + 1).is_err());
        cart.add_product(&p, MAX_QUANTITY_PER_ITEM).unwrap();
        assert!(cart.update_quantity(p.id, 1).is_err());
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new();
        let result = cart.add_product(&product(1, 100), 0);
        assert_eq!(result.unwrap_err(), CommerceError::InvalidQuantity(0));
    }

    #[test]
    fn test_line_savings() {
        let item = LineItem::new(1, "Watch", Money::usd(19999), 2)
            .with_original_price(Money::usd(24999));
        assert_eq!(item.savings().unwrap(), Money::usd(10000));

        let full_price = LineItem::new(2, "Cable", Money::usd(999), 3);
        assert!(full_price.savings().unwrap().is_zero());
    }
}
