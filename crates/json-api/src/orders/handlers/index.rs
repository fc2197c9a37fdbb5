//! Order Index Handler

use salvo::prelude::*;
use uuid::Uuid;

use storefront_app::domain::orders::models::{OrdersQuery, OrdersSort};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrdersPageResponse},
};

/// Read `orderId`, `sort` and `pn` from the query string. Absent parameters
/// fall back to all orders, newest first, page 1.
fn orders_query(req: &Request) -> Result<OrdersQuery, StatusError> {
    let order = req
        .query::<String>("orderId")
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.parse::<Uuid>())
        .transpose()
        .or_400("could not parse \"orderId\" query parameter")?
        .map(Into::into);

    let sort = req
        .query::<String>("sort")
        .map(|value| value.parse::<OrdersSort>())
        .transpose()
        .or_400("could not parse \"sort\" query parameter")?
        .unwrap_or_default();

    let page_number = req
        .query::<String>("pn")
        .map(|value| value.parse::<u32>())
        .transpose()
        .or_400("could not parse \"pn\" query parameter")?
        .unwrap_or(1)
        .max(1);

    Ok(OrdersQuery {
        order,
        sort,
        page_number,
    })
}

/// Order Index Handler
///
/// Returns one page of orders, optionally filtered to a single order id and
/// sorted by `dateDesc` (default), `dateAsc`, `priceAsc` or `priceDesc`.
#[endpoint(tags("orders"), summary = "List Orders")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OrdersPageResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let query = orders_query(req)?;

    let page = state
        .orders
        .list_orders(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
