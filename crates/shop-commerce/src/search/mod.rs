//! Search module.
//!
//! Filter and sort parameters, the query engine, facets and pagination.

mod engine;
mod filter;
mod query;
mod results;

pub use engine::{matches, run_query, sort_products, Facets};
pub use filter::{PriceRange, Selection, ALL};
pub use query::{ResetBounds, ShopQuery, SortOption};
pub use results::{paginate, Facet, FacetValue, Pagination, SearchResults, DEFAULT_PER_PAGE};
