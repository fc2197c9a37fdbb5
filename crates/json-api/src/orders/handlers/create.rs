//! Create Order Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::data::{NewOrder, NewOrderLine};

use crate::{
    extensions::*,
    observability::record_order_created,
    orders::{errors::into_status_error, responses::OrderResponse},
};

/// Submitted cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductLineRequest {
    pub product_id: Uuid,

    /// Unit price in minor currency units
    pub price: u64,
    pub quantity: u32,

    #[serde(default)]
    pub size: Option<String>,

    #[serde(default)]
    pub color: Option<String>,
}

/// Shipping address as entered by the shopper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressRequest {
    pub full_name: String,
    pub contact_number: String,
    pub country: String,
    pub city: String,
    pub address_line: String,

    #[serde(default)]
    pub address_line_second: Option<String>,
}

/// Submitting shopper. The address must be present but is not used; orders
/// ship to the address stored on the account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderUserRequest {
    pub email: String,
    pub address: AddressRequest,
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    /// Opaque payment reference, stored as the order invoice
    pub payment_intent: String,
    pub products: Vec<ProductLineRequest>,
    pub user: OrderUserRequest,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            payment_intent: request.payment_intent,
            email: request.user.email,
            lines: request
                .products
                .into_iter()
                .map(|line| NewOrderLine {
                    product_uuid: line.product_id.into(),
                    price: line.price,
                    quantity: line.quantity,
                    size: line.size,
                    color: line.color,
                })
                .collect(),
        }
    }
}

/// Create Order Handler
///
/// Turns a checkout submission into an order.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order rejected"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let order = state
        .orders
        .create_order(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_order_created();

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
