//! Postgres Orders Repository

use std::collections::HashMap;

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        orders::models::{Order, OrderItem, OrderStatus, OrderUuid, OrdersSort},
        products::models::{FALLBACK_IMAGE_SRC, ProductImage, ProductUuid},
        users::models::{Address, UserUuid},
    },
};

use super::OrdersRepository;

const INSERT_ORDER_SQL: &str = include_str!("../sql/insert_order.sql");
const INSERT_ORDER_ITEM_SQL: &str = include_str!("../sql/insert_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("../sql/count_orders.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    db: Db,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn attach_items(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = rows.iter().map(|row| row.uuid.into_uuid()).collect();

        let mut items: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();

        for row in query_as::<Postgres, OrderItemRow>(GET_ORDER_ITEMS_SQL)
            .bind(&uuids)
            .fetch_all(self.db.pool())
            .await?
        {
            items.entry(row.order_uuid).or_default().push(row.item);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let order_items = items.remove(&row.uuid.into_uuid()).unwrap_or_default();
                row.into_order(order_items)
            })
            .collect())
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn insert_order(&self, order: &Order) -> Result<(), sqlx::Error> {
        let mut tx = self.db.begin_transaction().await?;

        query(INSERT_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user_uuid.into_uuid())
            .bind(order.status.as_str())
            .bind(to_i64(order.total, "total")?)
            .bind(&order.invoice)
            .bind(&order.address.full_name)
            .bind(&order.address.contact_number)
            .bind(&order.address.country)
            .bind(&order.address.city)
            .bind(&order.address.address_line)
            .bind(order.address.address_line_second.as_deref())
            .bind(SqlxTimestamp::from(order.created_at))
            .execute(&mut *tx)
            .await?;

        for (position, item) in order.items.iter().enumerate() {
            let position = i32::try_from(position).map_err(|e| sqlx::Error::ColumnDecode {
                index: "position".to_string(),
                source: Box::new(e),
            })?;

            let quantity = i32::try_from(item.quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?;

            query(INSERT_ORDER_ITEM_SQL)
                .bind(order.uuid.into_uuid())
                .bind(position)
                .bind(item.product_uuid.into_uuid())
                .bind(to_i64(item.price, "price")?)
                .bind(quantity)
                .bind(item.size.as_deref())
                .bind(item.color.as_deref())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, sqlx::Error> {
        let row = query_as::<Postgres, OrderRow>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(self.db.pool())
            .await?;

        self.attach_items(vec![row])
            .await?
            .pop()
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn list_orders(
        &self,
        filter: Option<OrderUuid>,
        sort: OrdersSort,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let rows = query_as::<Postgres, OrderRow>(LIST_ORDERS_SQL)
            .bind(filter.map(OrderUuid::into_uuid))
            .bind(sort.as_str())
            .bind(i64::from(limit))
            .bind(to_i64(offset, "offset")?)
            .fetch_all(self.db.pool())
            .await?;

        self.attach_items(rows).await
    }

    async fn count_orders(&self, filter: Option<OrderUuid>) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_ORDERS_SQL)
            .bind(filter.map(OrderUuid::into_uuid))
            .fetch_one(self.db.pool())
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total_orders".to_string(),
            source: Box::new(e),
        })
    }
}

fn to_i64(value: u64, column: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn try_get_u64(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Order columns without items.
struct OrderRow {
    uuid: OrderUuid,
    user_uuid: UserUuid,
    address: Address,
    status: OrderStatus,
    total: u64,
    invoice: String,
    created_at: jiff::Timestamp,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            uuid: self.uuid,
            user_uuid: self.user_uuid,
            address: self.address,
            status: self.status,
            items,
            total: self.total,
            invoice: self.invoice,
            created_at: self.created_at,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            address: Address {
                full_name: row.try_get("full_name")?,
                contact_number: row.try_get("contact_number")?,
                country: row.try_get("country")?,
                city: row.try_get("city")?,
                address_line: row.try_get("address_line")?,
                address_line_second: row.try_get("address_line_second")?,
            },
            status,
            total: try_get_u64(row, "total")?,
            invoice: row.try_get("invoice")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

struct OrderItemRow {
    order_uuid: Uuid,
    item: OrderItem,
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let brand: String = row.try_get("brand")?;

        let image = match row.try_get::<Option<String>, _>("image_src")? {
            Some(src) => ProductImage {
                src,
                alt: row.try_get::<Option<String>, _>("image_alt")?.unwrap_or_default(),
            },
            None => ProductImage {
                src: FALLBACK_IMAGE_SRC.to_string(),
                alt: brand.clone(),
            },
        };

        let quantity: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            order_uuid: row.try_get("order_uuid")?,
            item: OrderItem {
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                brand,
                name: row.try_get("name")?,
                image,
                price: try_get_u64(row, "price")?,
                quantity,
                size: row.try_get("size")?,
                color: row.try_get("color")?,
            },
        })
    }
}
