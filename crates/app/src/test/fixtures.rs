//! Seed data for Postgres-backed tests.

use sqlx::{PgPool, query};

use crate::domain::{
    products::models::ProductUuid,
    users::models::{Address, UserUuid},
};

/// The address every seeded user gets.
pub(crate) fn address() -> Address {
    Address {
        full_name: "Ada Lovelace".to_string(),
        contact_number: "+44 20 7946 0000".to_string(),
        country: "United Kingdom".to_string(),
        city: "London".to_string(),
        address_line: "12 St James's Square".to_string(),
        address_line_second: None,
    }
}

pub(crate) async fn insert_user(
    pool: &PgPool,
    email: &str,
    with_address: bool,
) -> Result<UserUuid, sqlx::Error> {
    let uuid = UserUuid::new();

    query("INSERT INTO users (uuid, email) VALUES ($1, $2)")
        .bind(uuid.into_uuid())
        .bind(email)
        .execute(pool)
        .await?;

    if with_address {
        let address = address();

        query(
            "INSERT INTO addresses (uuid, user_uuid, full_name, contact_number, country, city, address_line, address_line_second) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(uuid::Uuid::now_v7())
        .bind(uuid.into_uuid())
        .bind(address.full_name)
        .bind(address.contact_number)
        .bind(address.country)
        .bind(address.city)
        .bind(address.address_line)
        .bind(address.address_line_second)
        .execute(pool)
        .await?;
    }

    Ok(uuid)
}

pub(crate) async fn insert_product(
    pool: &PgPool,
    brand: &str,
    name: &str,
    price: u64,
) -> Result<ProductUuid, sqlx::Error> {
    let uuid = ProductUuid::new();

    let price = i64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
        index: "price".to_string(),
        source: Box::new(e),
    })?;

    query("INSERT INTO products (uuid, brand, name, price, stock) VALUES ($1, $2, $3, $4, 10)")
        .bind(uuid.into_uuid())
        .bind(brand)
        .bind(name)
        .bind(price)
        .execute(pool)
        .await?;

    Ok(uuid)
}

pub(crate) async fn insert_product_image(
    pool: &PgPool,
    product: ProductUuid,
    position: i32,
    src: &str,
    alt: &str,
) -> Result<(), sqlx::Error> {
    query("INSERT INTO product_images (product_uuid, position, src, alt) VALUES ($1, $2, $3, $4)")
        .bind(product.into_uuid())
        .bind(position)
        .bind(src)
        .bind(alt)
        .execute(pool)
        .await?;

    Ok(())
}
