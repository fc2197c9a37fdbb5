//! Catalog Repositories

use async_trait::async_trait;
use mockall::automock;

use crate::domain::products::models::{Product, ProductUuid};

mod memory;
mod pg;

pub use memory::InMemoryCatalogRepository;
pub use pg::PgCatalogRepository;

/// Read access to the product catalog.
#[automock]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Find a product by UUID, with its images in display order.
    async fn find_product(&self, product: ProductUuid) -> Result<Option<Product>, sqlx::Error>;
}
