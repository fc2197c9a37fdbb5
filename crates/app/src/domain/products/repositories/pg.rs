//! Postgres Catalog Repository

use async_trait::async_trait;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::Db,
    domain::products::models::{Product, ProductImage, ProductUuid},
};

use super::CatalogRepository;

const FIND_PRODUCT_SQL: &str = include_str!("../sql/find_product.sql");
const FIND_PRODUCT_IMAGES_SQL: &str = include_str!("../sql/find_product_images.sql");

#[derive(Debug, Clone)]
pub struct PgCatalogRepository {
    db: Db,
}

impl PgCatalogRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn find_product(&self, product: ProductUuid) -> Result<Option<Product>, sqlx::Error> {
        let Some(mut found) = query_as::<Postgres, Product>(FIND_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(self.db.pool())
            .await?
        else {
            return Ok(None);
        };

        found.images = query_as::<Postgres, ProductImage>(FIND_PRODUCT_IMAGES_SQL)
            .bind(product.into_uuid())
            .fetch_all(self.db.pool())
            .await?;

        Ok(Some(found))
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;

        let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        let stock_i32: i32 = row.try_get("stock")?;

        let stock = u32::try_from(stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            brand: row.try_get("brand")?,
            name: row.try_get("name")?,
            price,
            stock,
            images: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductImage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            src: row.try_get("src")?,
            alt: row.try_get("alt")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestDb, fixtures};

    use super::*;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn finds_product_with_ordered_images() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = PgCatalogRepository::new(Db::new(test_db.pool().clone()));

        let uuid = fixtures::insert_product(test_db.pool(), "Acme", "Runner", 4_999).await?;
        fixtures::insert_product_image(test_db.pool(), uuid, 1, "/img/back.png", "back").await?;
        fixtures::insert_product_image(test_db.pool(), uuid, 0, "/img/front.png", "front").await?;

        let product = repository
            .find_product(uuid)
            .await?
            .ok_or("product not found")?;

        assert_eq!(product.brand, "Acme");
        assert_eq!(product.price, 4_999);
        assert_eq!(product.images.len(), 2);
        assert_eq!(product.display_image().src, "/img/front.png");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn missing_product_is_none() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = PgCatalogRepository::new(Db::new(test_db.pool().clone()));

        assert!(repository.find_product(ProductUuid::new()).await?.is_none());

        Ok(())
    }
}
