//! Depot helper extensions.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::state::State;

/// Access to the shared application state injected by `affix_state`.
pub(crate) trait DepotExt {
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError>;
}

impl DepotExt for Depot {
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain::<Arc<State>>().map_err(|_missing| {
            error!("application state missing from depot");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::domain::orders::MockOrdersService;

    use crate::test_helpers::state_with_orders;

    use super::*;

    #[test]
    fn missing_state_is_internal_error() {
        let depot = Depot::new();

        assert_eq!(
            depot.state_or_500().err().map(|e| e.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[test]
    fn injected_state_is_returned() {
        let mut depot = Depot::new();

        depot.inject(state_with_orders(MockOrdersService::new()));

        assert!(depot.state_or_500().is_ok(), "expected injected state");
    }
}
