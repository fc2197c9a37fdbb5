//! In-memory Orders Repository

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::orders::models::{Order, OrderUuid, OrdersSort};

use super::OrdersRepository;

/// Insertion-ordered order storage for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrdersRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrdersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored order, in insertion order.
    pub async fn all(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }
}

#[async_trait]
impl OrdersRepository for InMemoryOrdersRepository {
    async fn insert_order(&self, order: &Order) -> Result<(), sqlx::Error> {
        self.orders.write().await.push(order.clone());

        Ok(())
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, sqlx::Error> {
        self.orders
            .read()
            .await
            .iter()
            .find(|stored| stored.uuid == order)
            .cloned()
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn list_orders(
        &self,
        filter: Option<OrderUuid>,
        sort: OrdersSort,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .iter()
            .filter(|order| filter.is_none_or(|uuid| order.uuid == uuid))
            .cloned()
            .collect();

        orders.sort_by(|a, b| {
            let primary = match sort {
                OrdersSort::DateDesc => b.created_at.cmp(&a.created_at),
                OrdersSort::DateAsc => a.created_at.cmp(&b.created_at),
                OrdersSort::PriceAsc => a.total.cmp(&b.total),
                OrdersSort::PriceDesc => b.total.cmp(&a.total),
            };

            primary.then_with(|| a.uuid.cmp(&b.uuid))
        });

        Ok(orders
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn count_orders(&self, filter: Option<OrderUuid>) -> Result<u64, sqlx::Error> {
        let count = self
            .orders
            .read()
            .await
            .iter()
            .filter(|order| filter.is_none_or(|uuid| order.uuid == uuid))
            .count();

        Ok(count as u64)
    }
}
