//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Catalog queries never fail; these cover building parameters from
/// untrusted text and the cart/session flows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(u32),

    /// Two catalog records share an id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProductId(u32),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(u32),

    /// Price range with a lower bound above its upper bound.
    #[error("Invalid price range: min {min} is greater than max {max}")]
    InvalidPriceRange { min: String, max: String },

    /// Price that could not be parsed or is negative.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Unknown sort key.
    #[error("Unknown sort option: {0}")]
    UnknownSortOption(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Invalid promo code.
    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// Email address rejected by form validation.
    #[error("Please enter a valid email address: {0:?}")]
    InvalidEmail(String),

    /// Sign-up password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Required form field left empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
