//! Storefront Cart
//!
//! Client-resident shopping cart: merge-on-add line items, derived totals,
//! durable persistence and the checkout hand-off to the order service.

pub mod checkout;
pub mod lines;
pub mod session;
pub mod storage;
pub mod store;

pub use checkout::{Checkout, CheckoutError, CheckoutGate};
pub use lines::{CartLine, LineKey, NewCartLine, ProductImage};
pub use session::{Address, Shopper};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::CartStore;
