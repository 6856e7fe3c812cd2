//! Storefront domain types and logic for ShopHub.
//!
//! This crate holds everything behind the storefront pages:
//!
//! - **Catalog**: the immutable product collection, categories, brands
//! - **Search**: category/brand/price filters, sort keys, facets, pagination
//! - **Cart**: line items, promo codes, shipping and tax
//! - **Deals**: discount-driven sections and the sale countdown
//! - **View**: explicit page state passed into the pure query functions
//! - **Session**: simulated sign-in and promo flows with injectable delays
//!
//! # Example
//!
//! ```rust
//! use shop_commerce::prelude::*;
//!
//! let catalog = Catalog::shipped()?;
//! let query = ShopQuery::new()
//!     .with_brand("Apple")
//!     .with_sort(SortOption::PriceLow);
//!
//! let prices: Vec<String> = run_query(&catalog, &query)
//!     .iter()
//!     .map(|p| p.price.display())
//!     .collect();
//! assert_eq!(prices, ["$249.99", "$1099.99", "$1199.99", "$2499.99"]);
//! # Ok::<(), shop_commerce::CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod deals;
pub mod search;
pub mod session;
pub mod view;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, CategoryInfo, Product};

    // Search
    pub use crate::search::{
        paginate, run_query, Facets, Pagination, PriceRange, ResetBounds, SearchResults,
        Selection, ShopQuery, SortOption,
    };

    // Cart
    pub use crate::cart::{Cart, CartPricing, LineItem, PricingRules, PromoCode};

    // Pages
    pub use crate::deals::{flash_deals, mega_sale, weekly_deals, Countdown};
    pub use crate::view::{NewsletterForm, ShopView, ViewMode};
    pub use crate::wishlist::Wishlist;

    // Session
    pub use crate::session::{
        AuthFlow, AuthForm, AuthMode, AuthOutcome, Delay, NoDelay, PromoEntry, SessionTimings,
        TaskState, TokioDelay,
    };
}
