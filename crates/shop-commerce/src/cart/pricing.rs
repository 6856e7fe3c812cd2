//! Cart pricing calculations.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Shipping and tax rules applied to a cart subtotal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricingRules {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Money,
    /// Shipping charged otherwise.
    pub flat_shipping: Money,
    /// Tax rate as a fraction (0.08 = 8%).
    pub tax_rate: f64,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::usd(9900),
            flat_shipping: Money::usd(999),
            tax_rate: 0.08,
        }
    }
}

impl PricingRules {
    /// Shipping cost for a subtotal.
    pub fn shipping_for(&self, subtotal: &Money) -> Money {
        if subtotal.amount_cents > self.free_shipping_threshold.amount_cents {
            Money::zero(subtotal.currency)
        } else {
            self.flat_shipping
        }
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Sale savings against original prices (display only).
    pub savings: Money,
    /// Promo code discount.
    pub promo_discount: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Tax on the discounted subtotal.
    pub tax: Money,
    /// Final total (subtotal - promo + shipping + tax).
    pub grand_total: Money,
}

impl CartPricing {
    /// Price a cart from its subtotal, savings and promo discount.
    pub fn calculate(
        subtotal: Money,
        savings: Money,
        promo_discount: Money,
        rules: &PricingRules,
    ) -> Result<Self, CommerceError> {
        let discounted = subtotal
            .try_subtract(&promo_discount)
            .ok_or(CommerceError::Overflow)?;
        let shipping = rules.shipping_for(&subtotal);
        let tax = discounted.multiply_decimal(rules.tax_rate);
        let grand_total = discounted
            .try_add(&shipping)
            .and_then(|m| m.try_add(&tax))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            savings,
            promo_discount,
            shipping,
            tax,
            grand_total,
        })
    }

    /// Check if shipping is free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// Check if a promo discount is applied.
    pub fn has_promo(&self) -> bool {
        self.promo_discount.is_positive()
    }

    /// Get discount percentage of subtotal.
    pub fn discount_percentage(&self) -> f64 {
        if self.subtotal.amount_cents == 0 {
            return 0.0;
        }
        (self.promo_discount.amount_cents as f64 / self.subtotal.amount_cents as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_threshold_is_exclusive() {
        let rules = PricingRules::default();
        assert_eq!(rules.shipping_for(&Money::usd(9900)), Money::usd(999));
        assert!(rules.shipping_for(&Money::usd(9901)).is_zero());
    }

    #[test]
    fn test_small_order_pays_shipping() {
        let rules = PricingRules::default();
        let pricing =
            CartPricing::calculate(Money::usd(5000), Money::usd(0), Money::usd(0), &rules).unwrap();

        assert_eq!(pricing.shipping, Money::usd(999));
        assert_eq!(pricing.tax, Money::usd(400));
        assert_eq!(pricing.grand_total, Money::usd(6399));
        assert!(!pricing.has_free_shipping());
    }

    #[test]
    fn test_tax_applies_after_promo() {
        let rules = PricingRules::default();
        let pricing =
            CartPricing::calculate(Money::usd(20000), Money::usd(0), Money::usd(2000), &rules)
                .unwrap();

        assert_eq!(pricing.tax, Money::usd(1440));
        assert_eq!(pricing.grand_total, Money::usd(19440));
        assert!(pricing.has_promo());
        assert!((pricing.discount_percentage() - 10.0).abs() < 0.01);
    }
}
