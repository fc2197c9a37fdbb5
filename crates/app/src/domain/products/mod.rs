//! Products
//!
//! Catalog lookups used to resolve order line display metadata.

pub mod models;
pub mod repositories;

pub use repositories::{CatalogRepository, InMemoryCatalogRepository, PgCatalogRepository};
