//! Order response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    orders::models::{Order, OrderItem, OrdersPage},
    users::models::Address,
};

/// Shipping address captured on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressResponse {
    pub full_name: String,
    pub contact_number: String,
    pub country: String,
    pub city: String,
    pub address_line: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_second: Option<String>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            full_name: address.full_name,
            contact_number: address.contact_number,
            country: address.country,
            city: address.city,
            address_line: address.address_line,
            address_line_second: address.address_line_second,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub product_id: Uuid,
    pub brand: String,
    pub name: String,
    pub image_src: String,
    pub image_alt: String,

    /// Unit price in minor currency units, as submitted at checkout
    pub price: u64,
    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_uuid.into(),
            brand: item.brand,
            name: item.name,
            image_src: item.image.src,
            image_alt: item.image.alt,
            price: item.price,
            quantity: item.quantity,
            size: item.size,
            color: item.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub order_id: Uuid,

    /// RFC 3339 creation time
    pub order_date: String,
    pub order_status: String,

    /// Sum of price × quantity over all items, in minor currency units
    pub order_total: u64,

    /// Payment reference submitted with the order
    pub order_invoice: String,
    pub address: AddressResponse,
    pub order_items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.uuid.into(),
            order_date: order.created_at.to_string(),
            order_status: order.status.to_string(),
            order_total: order.total,
            order_invoice: order.invoice,
            address: order.address.into(),
            order_items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrdersPageResponse {
    pub page_size: u32,
    pub page_number: u32,
    pub total_orders: u64,
    pub orders: Vec<OrderResponse>,
}

impl From<OrdersPage> for OrdersPageResponse {
    fn from(page: OrdersPage) -> Self {
        Self {
            page_size: page.page_size,
            page_number: page.page_number,
            total_orders: page.total_orders,
            orders: page.orders.into_iter().map(Into::into).collect(),
        }
    }
}
