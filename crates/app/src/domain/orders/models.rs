//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        products::models::{ProductImage, ProductUuid},
        users::models::{Address, UserUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Number of orders per listing page.
pub const PAGE_SIZE: u32 = 10;

/// Order fulfilment status.
///
/// Orders are created as [`OrderStatus::Preparing`]. Later transitions are
/// made by fulfilment tooling and must follow [`OrderStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Preparing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preparing => "Preparing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether an order in this status may move to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Preparing, Self::Shipped | Self::Cancelled) | (Self::Shipped, Self::Delivered)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Preparing" => Ok(Self::Preparing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Order line, priced as submitted at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product_uuid: ProductUuid,
    pub brand: String,
    pub name: String,
    pub image: ProductImage,
    pub price: u64,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub address: Address,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub total: u64,
    pub invoice: String,
    pub created_at: Timestamp,
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrdersSort {
    #[default]
    DateDesc,
    DateAsc,
    PriceAsc,
    PriceDesc,
}

impl OrdersSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "dateDesc",
            Self::DateAsc => "dateAsc",
            Self::PriceAsc => "priceAsc",
            Self::PriceDesc => "priceDesc",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort order: {0}")]
pub struct UnknownOrdersSort(pub String);

impl FromStr for OrdersSort {
    type Err = UnknownOrdersSort;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dateDesc" => Ok(Self::DateDesc),
            "dateAsc" => Ok(Self::DateAsc),
            "priceAsc" => Ok(Self::PriceAsc),
            "priceDesc" => Ok(Self::PriceDesc),
            other => Err(UnknownOrdersSort(other.to_string())),
        }
    }
}

/// Order listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersQuery {
    pub order: Option<OrderUuid>,
    pub sort: OrdersSort,

    /// One-based page number.
    pub page_number: u32,
}

impl Default for OrdersQuery {
    fn default() -> Self {
        Self {
            order: None,
            sort: OrdersSort::default(),
            page_number: 1,
        }
    }
}

impl OrdersQuery {
    /// Rows to skip for the requested page. Page 0 is treated as page 1.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)) * u64::from(PAGE_SIZE)
    }
}

/// One page of orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersPage {
    pub page_size: u32,
    pub page_number: u32,
    pub total_orders: u64,
    pub orders: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preparing_moves_to_shipped_or_cancelled() {
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn shipped_only_moves_to_delivered() {
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Preparing));
    }

    #[test]
    fn terminal_statuses_do_not_move() {
        for next in [
            OrderStatus::Preparing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert!(!OrderStatus::Delivered.can_transition_to(next));
            assert!(!OrderStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn status_parses_its_own_name() {
        assert_eq!("Shipped".parse(), Ok(OrderStatus::Shipped));
        assert_eq!(
            "shipped".parse::<OrderStatus>(),
            Err(UnknownOrderStatus("shipped".to_string()))
        );
    }

    #[test]
    fn sort_defaults_to_newest_first() {
        assert_eq!(OrdersSort::default(), OrdersSort::DateDesc);
        assert_eq!("priceAsc".parse(), Ok(OrdersSort::PriceAsc));
        assert!("cheapest".parse::<OrdersSort>().is_err());
    }

    #[test]
    fn offset_is_zero_for_first_page() {
        let query = OrdersQuery::default();

        assert_eq!(query.offset(), 0);
        assert_eq!(
            OrdersQuery {
                page_number: 3,
                ..OrdersQuery::default()
            }
            .offset(),
            20
        );
        assert_eq!(
            OrdersQuery {
                page_number: 0,
                ..OrdersQuery::default()
            }
            .offset(),
            0
        );
    }
}
