//! Order Repositories

use async_trait::async_trait;
use mockall::automock;

use crate::domain::orders::models::{Order, OrderUuid, OrdersSort};

mod memory;
mod pg;

pub use memory::InMemoryOrdersRepository;
pub use pg::PgOrdersRepository;

/// Durable order storage.
#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Persist an order and all of its items atomically.
    async fn insert_order(&self, order: &Order) -> Result<(), sqlx::Error>;

    /// Fetch a single order; `RowNotFound` when it does not exist.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, sqlx::Error>;

    /// Fetch up to `limit` orders after skipping `offset`, in `sort` order.
    async fn list_orders(
        &self,
        filter: Option<OrderUuid>,
        sort: OrdersSort,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Order>, sqlx::Error>;

    /// Count the orders matching `filter`.
    async fn count_orders(&self, filter: Option<OrderUuid>) -> Result<u64, sqlx::Error>;
}
