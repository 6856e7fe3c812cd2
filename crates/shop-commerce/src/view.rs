//! Explicit view state for the storefront pages.
//!
//! Every user-adjustable value lives here and is passed into the pure
//! functions of [`crate::search`]; handlers read bound values from these
//! structs, never from the presentation layer.

use crate::catalog::{Catalog, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::search::{
    paginate, Facets, PriceRange, ResetBounds, SearchResults, Selection, ShopQuery, SortOption,
    DEFAULT_PER_PAGE,
};
use crate::wishlist::Wishlist;
use serde::{Deserialize, Serialize};

/// Product grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// State of the shop listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopView {
    /// Filter and sort parameters.
    pub query: ShopQuery,
    /// Current page (1-indexed, clamped when rendered).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    pub view_mode: ViewMode,
    /// Header cart badge.
    pub cart_count: u32,
    pub wishlist: Wishlist,
    /// Price interval a reset restores.
    pub reset_bounds: ResetBounds,
}

impl ShopView {
    /// Fresh view state with default parameters.
    pub fn new(bounds: ResetBounds, catalog: &Catalog) -> Self {
        Self {
            query: ShopQuery::defaults(bounds, catalog),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            view_mode: ViewMode::default(),
            cart_count: 0,
            wishlist: Wishlist::new(),
            reset_bounds: bounds,
        }
    }

    /// View state seeded from a navigation query string.
    pub fn from_query_string(qs: &str, bounds: ResetBounds, catalog: &Catalog) -> Self {
        Self {
            query: ShopQuery::from_query_string(qs, bounds, catalog),
            ..Self::new(bounds, catalog)
        }
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Select a category; returns to the first page.
    pub fn select_category(&mut self, category: &str) {
        self.query.category = Selection::parse(category);
        self.page = 1;
    }

    /// Select a brand; returns to the first page.
    pub fn select_brand(&mut self, brand: &str) {
        self.query.brand = Selection::parse(brand);
        self.page = 1;
    }

    /// Set the price interval; returns to the first page.
    pub fn set_price_range(&mut self, range: PriceRange) {
        self.query.price_range = range;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.query.sort = sort;
    }

    /// Restore every filter and the sort to defaults.
    pub fn clear_filters(&mut self, catalog: &Catalog) {
        self.query.reset(self.reset_bounds, catalog);
        self.page = 1;
    }

    /// The current page of results.
    pub fn results<'a>(&self, catalog: &'a Catalog) -> SearchResults<&'a Product> {
        let all = crate::search::run_query(catalog, &self.query);
        paginate(&all, self.page, self.per_page)
    }

    /// Sidebar counts for the current parameters.
    pub fn facets(&self, catalog: &Catalog) -> Facets {
        Facets::compute(catalog, &self.query)
    }

    /// Bump the cart badge.
    pub fn add_to_cart(&mut self) {
        self.cart_count = self.cart_count.saturating_add(1);
    }

    /// Returns whether the product is wished for afterwards.
    pub fn toggle_wishlist(&mut self, id: ProductId) -> bool {
        self.wishlist.toggle(id)
    }
}

/// The newsletter signup field, bound to view state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterForm {
    pub email: String,
}

impl NewsletterForm {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Subscribe with the bound email. Clears the field on success and
    /// returns the confirmation message.
    pub fn subscribe(&mut self) -> Result<String, CommerceError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(CommerceError::InvalidEmail(self.email.clone()));
        }

        let message = format!(
            "Thank you for subscribing with {email}! You'll receive our latest deals and updates."
        );
        tracing::info!(email, "newsletter subscription");
        self.email.clear();
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ALL;

    #[test]
    fn test_new_view_defaults() {
        let catalog = Catalog::shipped().unwrap();
        let view = ShopView::new(ResetBounds::default(), &catalog);
        assert_eq!(view.query, ShopQuery::new());
        assert_eq!(view.page, 1);
        assert_eq!(view.view_mode, ViewMode::Grid);
        assert_eq!(view.results(&catalog).len(), catalog.len());
    }

    #[test]
    fn test_seeded_view() {
        let catalog = Catalog::shipped().unwrap();
        let view = ShopView::from_query_string("category=Gaming", ResetBounds::default(), &catalog);
        let ids: Vec<u32> = view.results(&catalog).items.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn test_filter_change_returns_to_first_page() {
        let catalog = Catalog::shipped().unwrap();
        let mut view = ShopView::new(ResetBounds::default(), &catalog).with_per_page(5);
        view.page = 3;
        assert_eq!(view.results(&catalog).items.len(), 2);

        view.select_brand("Apple");
        assert_eq!(view.page, 1);
        assert_eq!(view.results(&catalog).pagination.total, 4);

        view.clear_filters(&catalog);
        assert_eq!(view.query.brand.as_str(), ALL);
    }

    #[test]
    fn test_badges() {
        let catalog = Catalog::shipped().unwrap();
        let mut view = ShopView::new(ResetBounds::default(), &catalog);
        view.add_to_cart();
        view.add_to_cart();
        assert_eq!(view.cart_count, 2);
        assert!(view.toggle_wishlist(ProductId::new(3)));
        assert_eq!(view.wishlist.len(), 1);
    }

    #[test]
    fn test_newsletter_requires_at_sign() {
        let mut form = NewsletterForm::new("not-an-email");
        assert!(form.subscribe().is_err());
        assert_eq!(form.email, "not-an-email");

        let mut empty = NewsletterForm::default();
        assert!(empty.subscribe().is_err());

        let mut form = NewsletterForm::new("ada@example.com");
        let message = form.subscribe().unwrap();
        assert!(message.contains("ada@example.com"));
        assert!(form.email.is_empty());
    }
}
