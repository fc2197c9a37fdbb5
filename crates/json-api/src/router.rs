//! App Router

use salvo::Router;

use crate::{healthcheck, observability::metrics_handler, orders};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("add").post(orders::create::handler))
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        Service,
        affix_state::inject,
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use storefront_app::domain::orders::{
        MockOrdersService,
        models::{OrdersPage, PAGE_SIZE},
    };
    use testresult::TestResult;

    use crate::test_helpers::state_with_orders;

    use super::*;

    #[tokio::test]
    async fn add_is_not_captured_by_the_order_route() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_get_order().never();
        orders.expect_create_order().never();
        orders.expect_list_orders().never();

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_orders(orders)))
                .push(app_router()),
        );

        let res = TestClient::post("http://example.com/orders/add")
            .json(&serde_json::json!({}))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn lists_orders_at_the_collection_root() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().once().return_once(|_| {
            Ok(OrdersPage {
                page_size: PAGE_SIZE,
                page_number: 1,
                total_orders: 0,
                orders: Vec::new(),
            })
        });

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_orders(orders)))
                .push(app_router()),
        );

        let mut res = TestClient::get("http://example.com/orders")
            .send(&service)
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.get("totalOrders"), Some(&serde_json::json!(0)));

        Ok(())
    }
}
