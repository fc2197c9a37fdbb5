//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            models::{
                Order, OrderItem, OrderStatus, OrderUuid, OrdersPage, OrdersQuery, PAGE_SIZE,
            },
            repositories::{OrdersRepository, PgOrdersRepository},
        },
        products::{CatalogRepository, PgCatalogRepository},
        users::{PgUsersRepository, UsersRepository},
    },
};

/// Orders service backed by user, catalog and order repositories.
#[derive(Clone)]
pub struct RepositoryOrdersService {
    users: Arc<dyn UsersRepository>,
    catalog: Arc<dyn CatalogRepository>,
    orders: Arc<dyn OrdersRepository>,
}

impl RepositoryOrdersService {
    #[must_use]
    pub fn new(
        users: Arc<dyn UsersRepository>,
        catalog: Arc<dyn CatalogRepository>,
        orders: Arc<dyn OrdersRepository>,
    ) -> Self {
        Self {
            users,
            catalog,
            orders,
        }
    }

    /// Service over the Postgres repositories.
    #[must_use]
    pub fn postgres(db: Db) -> Self {
        Self::new(
            Arc::new(PgUsersRepository::new(db.clone())),
            Arc::new(PgCatalogRepository::new(db.clone())),
            Arc::new(PgOrdersRepository::new(db)),
        )
    }
}

fn malformed(detail: &str) -> OrdersServiceError {
    OrdersServiceError::Malformed(detail.to_string())
}

#[async_trait]
impl OrdersService for RepositoryOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        if order.payment_intent.trim().is_empty() {
            return Err(malformed("missing payment intent"));
        }

        if order.lines.is_empty() {
            return Err(malformed("order has no products"));
        }

        if let Some(line) = order.lines.iter().find(|line| line.quantity == 0) {
            return Err(OrdersServiceError::Malformed(format!(
                "product {} has quantity 0",
                line.product_uuid
            )));
        }

        let Some(user) = self.users.find_user_by_email(&order.email).await? else {
            return Err(OrdersServiceError::UnknownUser);
        };

        let Some(address) = user.address else {
            return Err(OrdersServiceError::MissingAddress);
        };

        let mut items = Vec::with_capacity(order.lines.len());
        let mut total: u64 = 0;

        for line in order.lines {
            let Some(product) = self.catalog.find_product(line.product_uuid).await? else {
                return Err(OrdersServiceError::UnknownProduct(line.product_uuid));
            };

            // Submitted prices are charged as-is.
            if product.price != line.price {
                warn!(
                    product = %product.uuid,
                    catalog_price = product.price,
                    submitted_price = line.price,
                    "submitted price differs from catalog price"
                );
            }

            total = line
                .price
                .checked_mul(u64::from(line.quantity))
                .and_then(|line_total| total.checked_add(line_total))
                .filter(|sum| i64::try_from(*sum).is_ok())
                .ok_or_else(|| malformed("order total overflows"))?;

            items.push(OrderItem {
                product_uuid: product.uuid,
                image: product.display_image(),
                brand: product.brand,
                name: product.name,
                price: line.price,
                quantity: line.quantity,
                size: line.size,
                color: line.color,
            });
        }

        let created = Order {
            uuid: OrderUuid::new(),
            user_uuid: user.uuid,
            address,
            status: OrderStatus::Preparing,
            items,
            total,
            invoice: order.payment_intent,
            created_at: Timestamp::now(),
        };

        self.orders.insert_order(&created).await?;

        info!(
            order = %created.uuid,
            user = %created.user_uuid,
            items = created.items.len(),
            total = created.total,
            "order created"
        );

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        Ok(self.orders.get_order(order).await?)
    }

    async fn list_orders(&self, query: OrdersQuery) -> Result<OrdersPage, OrdersServiceError> {
        let total_orders = self.orders.count_orders(query.order).await?;

        let orders = self
            .orders
            .list_orders(query.order, query.sort, PAGE_SIZE, query.offset())
            .await?;

        Ok(OrdersPage {
            page_size: PAGE_SIZE,
            page_number: query.page_number.max(1),
            total_orders,
            orders,
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate a checkout submission and persist it as a new order.
    ///
    /// Checks run in order and stop at the first failure: the request shape,
    /// the user, the user's shipping address, then every product. Nothing is
    /// persisted unless all of them pass.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Retrieve one page of orders.
    async fn list_orders(&self, query: OrdersQuery) -> Result<OrdersPage, OrdersServiceError>;
}
