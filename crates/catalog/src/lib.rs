//! Catalog reference + classification engine.
//!
//! This crate holds the canonical, cross-organization product metadata
//! (`BaseItem`) and the pure rules that map that metadata onto the semantic
//! product groups and reporting categories used by reporting and distribution
//! eligibility. No IO, no storage; lookups go through the `BaseItemCatalog`
//! trait implemented by infrastructure.

pub mod base_item;
pub mod classification;

pub use base_item::{BaseItem, BaseItemCatalog, BaseItemId};
pub use classification::{classify, is_other, reporting_category, Classification, ProductGroup};
