//! Checkout
//!
//! The gate between the cart and the order service, and the hand-off itself:
//! snapshot the cart, submit it, and clear the cart only once the order
//! service has confirmed the order.

use thiserror::Error;
use tracing::{info, warn};

use crate::{session::Shopper, storage::CartStorage, store::CartStore};

mod gateway;
mod request;

pub use gateway::{GatewayError, HttpOrderGateway, MockOrderGateway, OrderGateway};
pub use request::{
    ConfirmedItem, OrderConfirmation, OrderRequest, ProductLine, UserSnapshot,
    placeholder_payment_intent,
};

/// Outcome of asking to proceed to checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutGate {
    /// No authenticated shopper; send them to the login flow.
    RequiresLogin,

    /// Nothing to check out.
    EmptyCart,

    /// The shopper may proceed.
    Ready,
}

/// Reasons a checkout did not produce an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No authenticated shopper.
    #[error("please sign in to check out")]
    RequiresLogin,

    /// The cart has no lines.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// The shopper has no stored shipping address.
    #[error("a shipping address is required")]
    MissingAddress,

    /// Submitting to the order service failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Drives a checkout through an [`OrderGateway`].
#[derive(Debug, Clone)]
pub struct Checkout<G> {
    gateway: G,
}

impl<G: OrderGateway> Checkout<G> {
    /// Create a checkout flow submitting through `gateway`.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Place an order for everything in `cart`.
    ///
    /// The cart is borrowed mutably for the whole submission, so a cart can
    /// have at most one order in flight. It is cleared only when the order
    /// service confirms the order; on any failure it is left untouched so the
    /// shopper can retry without re-adding items.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] when the checkout gate refuses, the shopper
    /// has no address, or the order service rejects or cannot be reached.
    pub async fn place_order<S: CartStorage>(
        &self,
        cart: &mut CartStore<S>,
        shopper: Option<&Shopper>,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let shopper = match (cart.go_checkout(shopper), shopper) {
            (CheckoutGate::Ready, Some(shopper)) => shopper,
            (CheckoutGate::EmptyCart, _) => return Err(CheckoutError::EmptyCart),
            (CheckoutGate::RequiresLogin | CheckoutGate::Ready, _) => {
                return Err(CheckoutError::RequiresLogin);
            }
        };

        let request = OrderRequest::from_cart(cart, shopper, placeholder_payment_intent())?;

        let confirmation = match self.gateway.submit(&request).await {
            Ok(confirmation) => confirmation,
            Err(error) => {
                warn!(
                    payment_intent = %request.payment_intent,
                    "checkout failed, keeping cart: {error}"
                );

                return Err(error.into());
            }
        };

        info!(order_id = %confirmation.order_id, "order confirmed");

        cart.clear();

        Ok(confirmation)
    }
}
