//! Shopping cart module.
//!
//! Contains types for cart, line items, pricing, and promo codes.

#[allow(clippy::module_inception)]
mod cart;
mod pricing;
mod promo;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartPricing, PricingRules};
pub use promo::PromoCode;
