//! Order Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use storefront_app::domain::orders::OrdersServiceError;

use crate::observability::record_order_rejected;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    if let Some(reason) = error.rejection_reason() {
        warn!(reason, "order rejected: {error}");
        record_order_rejected(reason);

        return StatusError::bad_request().brief(error.to_string());
    }

    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Malformed(_)
        | OrdersServiceError::UnknownUser
        | OrdersServiceError::MissingAddress
        | OrdersServiceError::UnknownProduct(_) => StatusError::bad_request(),
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::domain::products::models::ProductUuid;

    use super::*;

    #[test]
    fn rejections_are_bad_requests_with_reason() {
        let product = ProductUuid::new();

        let error = into_status_error(OrdersServiceError::UnknownProduct(product));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, format!("unknown product: {product}"));
    }

    #[test]
    fn missing_order_is_not_found() {
        assert_eq!(
            into_status_error(OrdersServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn storage_failures_are_internal_errors() {
        let error = into_status_error(OrdersServiceError::Sql(sqlx_error()));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
    }

    fn sqlx_error() -> storefront_app::database::SqlxError {
        storefront_app::database::SqlxError::PoolTimedOut
    }
}
