//! Catalogue facade implementation.
//!
//! `catalog` holds the `impl Catalog` blocks behind the search API; the struct
//! itself is defined in `lib.rs`.

mod builder;
mod catalog;

pub use builder::CatalogBuilder;
