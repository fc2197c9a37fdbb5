//! In-memory Catalog Repository

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::products::models::{Product, ProductUuid};

use super::CatalogRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogRepository {
    products: Arc<RwLock<HashMap<ProductUuid, Product>>>,
}

impl InMemoryCatalogRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a product.
    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.uuid, product);
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn find_product(&self, product: ProductUuid) -> Result<Option<Product>, sqlx::Error> {
        Ok(self.products.read().await.get(&product).cloned())
    }
}
