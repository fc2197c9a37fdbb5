//! Checkout wire contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    lines::CartLine,
    session::{Address, Shopper},
    storage::CartStorage,
    store::CartStore,
};

use super::CheckoutError;

/// One cart line as submitted at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    /// Catalog product
    pub product_id: Uuid,

    /// Unit price captured when the line was added
    pub price: u64,

    /// Number of units
    pub quantity: u32,

    /// Size selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Color selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<&CartLine> for ProductLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_uuid,
            price: line.price,
            quantity: line.quantity,
            size: line.size.clone(),
            color: line.color.clone(),
        }
    }
}

/// The shopper identity and address snapshot sent with an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    /// Account email
    pub email: String,

    /// Shipping address at checkout time
    pub address: Address,
}

/// Snapshot of the cart and shopper sent to the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Placeholder payment reference; becomes the order's invoice reference
    pub payment_intent: String,

    /// Cart lines in cart order
    pub products: Vec<ProductLine>,

    /// Shopper snapshot
    pub user: UserSnapshot,
}

impl OrderRequest {
    /// Snapshot `cart` and the shopper's stored address.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for an empty cart and
    /// [`CheckoutError::MissingAddress`] when the shopper has no address.
    pub fn from_cart<S: CartStorage>(
        cart: &CartStore<S>,
        shopper: &Shopper,
        payment_intent: String,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let address = shopper
            .address
            .clone()
            .ok_or(CheckoutError::MissingAddress)?;

        Ok(Self {
            payment_intent,
            products: cart.lines().iter().map(ProductLine::from).collect(),
            user: UserSnapshot {
                email: shopper.email.clone(),
                address,
            },
        })
    }
}

/// Generate a placeholder payment reference.
pub fn placeholder_payment_intent() -> String {
    format!("pi_{}", Uuid::now_v7().simple())
}

/// One item of a confirmed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedItem {
    /// Catalog product
    pub product_id: Uuid,

    /// Product brand
    pub brand: String,

    /// Product name
    pub name: String,

    /// Display image location
    pub image_src: String,

    /// Display image alternative text
    pub image_alt: String,

    /// Unit price charged
    pub price: u64,

    /// Number of units
    pub quantity: u32,

    /// Size selector
    #[serde(default)]
    pub size: Option<String>,

    /// Color selector
    #[serde(default)]
    pub color: Option<String>,
}

/// The order service's confirmation of a persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Assigned order identity
    pub order_id: Uuid,

    /// Creation time, RFC 3339
    pub order_date: String,

    /// Order status
    pub order_status: String,

    /// Order total in minor currency units
    pub order_total: u64,

    /// Invoice reference (the submitted payment intent)
    pub order_invoice: String,

    /// Shipping address snapshot
    pub address: Address,

    /// Ordered items
    pub order_items: Vec<ConfirmedItem>,
}
