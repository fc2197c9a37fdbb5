//! Order Data

use crate::domain::products::models::ProductUuid;

/// A checkout submission, as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub payment_intent: String,
    pub email: String,
    pub lines: Vec<NewOrderLine>,
}

/// One submitted cart line. `price` is the unit price the client saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_uuid: ProductUuid,
    pub price: u64,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}
