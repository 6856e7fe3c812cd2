//! Product catalog module.
//!
//! Contains the immutable product collection, product records and
//! category metadata.

#[allow(clippy::module_inception)]
mod catalog;
mod category;
mod product;

pub use catalog::{Catalog, FEATURED_COUNT};
pub use category::CategoryInfo;
pub use product::Product;
