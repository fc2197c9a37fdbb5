//! Cart Store

use rusty_money::{Money, iso::Currency};
use tracing::{debug, warn};

use crate::{
    checkout::CheckoutGate,
    lines::{CartLine, LineKey, NewCartLine},
    session::Shopper,
    storage::{CART_STORAGE_KEY, CartStorage},
};

/// The shopper's cart.
///
/// Owns the ordered cart lines and the storage they are persisted to. Every
/// mutation writes the full state back before returning; a failed write is
/// logged and otherwise ignored so a storage fault never blocks a purchase.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    lines: Vec<CartLine>,
    storage: S,
    currency: &'static Currency,
}

impl<S: CartStorage> CartStore<S> {
    /// Rehydrate the cart from `storage`.
    ///
    /// Missing, unreadable or corrupt state yields an empty cart. Lines with a
    /// zero quantity are discarded and repeated keys are folded into the first
    /// line carrying that key.
    pub fn hydrate(storage: S, currency: &'static Currency) -> Self {
        let lines = match storage.load(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => collapse(lines),
                Err(error) => {
                    warn!("discarding unreadable cart state: {error}");

                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!("failed to load cart state: {error}");

                Vec::new()
            }
        };

        debug!(lines = lines.len(), "cart hydrated");

        Self {
            lines,
            storage,
            currency,
        }
    }

    /// Flush the current state one last time and hand back the storage.
    pub fn close(mut self) -> S {
        self.persist();

        self.storage
    }

    /// Add one unit of `item`. An existing line with the same product, size
    /// and color is incremented; otherwise a new line is appended.
    pub fn add_to_cart(&mut self, item: NewCartLine) {
        let key = item.key();

        if let Some(line) = self.line_mut(&key) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::first(item));
        }

        self.persist();
    }

    /// Add one unit to an existing line. Unknown keys are ignored.
    pub fn increase_quantity(&mut self, key: &LineKey) {
        let Some(line) = self.line_mut(key) else {
            return;
        };

        line.quantity = line.quantity.saturating_add(1);

        self.persist();
    }

    /// Take one unit off a line, removing it when it would reach zero.
    /// Unknown keys are ignored.
    pub fn decrease_quantity(&mut self, key: &LineKey) {
        let Some(position) = self.position(key) else {
            return;
        };

        match self.lines.get_mut(position) {
            Some(line) if line.quantity > 1 => line.quantity -= 1,
            _ => {
                self.lines.remove(position);
            }
        }

        self.persist();
    }

    /// Remove a line regardless of its quantity. Unknown keys are ignored.
    pub fn remove_line(&mut self, key: &LineKey) {
        let before = self.lines.len();

        self.lines.retain(|line| !line.matches(key));

        if self.lines.len() != before {
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();

        self.persist();
    }

    /// Quantity of the given line, zero when absent.
    pub fn quantity_of(&self, key: &LineKey) -> u32 {
        self.lines
            .iter()
            .find(|line| line.matches(key))
            .map_or(0, |line| line.quantity)
    }

    /// Sum of line quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Sum of unit price times quantity, in minor currency units.
    pub fn subtotal(&self) -> u64 {
        self.lines
            .iter()
            .fold(0_u64, |total, line| total.saturating_add(line.line_total()))
    }

    /// The subtotal in the cart currency.
    pub fn subtotal_money(&self) -> Money<'static, Currency> {
        let minor = i64::try_from(self.subtotal()).unwrap_or(i64::MAX);

        Money::from_minor(minor, self.currency)
    }

    /// The cart lines, in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Decide whether the shopper may proceed to checkout.
    ///
    /// Without an authenticated shopper the caller should send them through
    /// the login flow; an empty cart cannot be checked out.
    pub fn go_checkout(&self, shopper: Option<&Shopper>) -> CheckoutGate {
        if shopper.is_none() {
            return CheckoutGate::RequiresLogin;
        }

        if self.is_empty() {
            return CheckoutGate::EmptyCart;
        }

        CheckoutGate::Ready
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(key))
    }

    fn line_mut(&mut self, key: &LineKey) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.matches(key))
    }

    fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.lines) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!("failed to serialize cart state: {error}");

                return;
            }
        };

        if let Err(error) = self.storage.save(CART_STORAGE_KEY, &serialized) {
            warn!("failed to persist cart state: {error}");
        }
    }
}

fn collapse(stored: Vec<CartLine>) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());

    for line in stored.into_iter().filter(|line| line.quantity > 0) {
        let key = line.key();

        match lines.iter_mut().find(|existing| existing.matches(&key)) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => lines.push(line),
        }
    }

    lines
}
