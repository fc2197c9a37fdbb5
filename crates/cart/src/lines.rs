//! Cart Lines

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display image for a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Image location
    pub src: String,

    /// Alternative text
    pub alt: String,
}

/// Identity of a cart line: the product plus its variant selectors.
///
/// Two lines for the same product with a different size or color are
/// distinct lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    /// Catalog product
    pub product_uuid: Uuid,

    /// Size selector
    pub size: Option<String>,

    /// Color selector
    pub color: Option<String>,
}

impl LineKey {
    /// Key for a product without variant selectors.
    pub fn product(product_uuid: Uuid) -> Self {
        Self {
            product_uuid,
            size: None,
            color: None,
        }
    }
}

/// An item the shopper asked to add to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    /// Catalog product
    pub product_uuid: Uuid,

    /// Product brand
    pub brand: String,

    /// Product name
    pub name: String,

    /// Display image
    pub image: Option<ProductImage>,

    /// Unit price in minor currency units, captured at add time
    pub price: u64,

    /// Size selector
    pub size: Option<String>,

    /// Color selector
    pub color: Option<String>,
}

impl NewCartLine {
    /// The identity this item merges on.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_uuid: self.product_uuid,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }
}

/// One distinct purchasable configuration in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog product
    pub product_uuid: Uuid,

    /// Product brand
    pub brand: String,

    /// Product name
    pub name: String,

    /// Display image
    pub image: Option<ProductImage>,

    /// Unit price in minor currency units, captured at add time
    pub price: u64,

    /// Size selector
    pub size: Option<String>,

    /// Color selector
    pub color: Option<String>,

    /// Number of units, always at least one
    pub quantity: u32,
}

impl CartLine {
    /// Start a new line at quantity one.
    pub fn first(item: NewCartLine) -> Self {
        Self {
            product_uuid: item.product_uuid,
            brand: item.brand,
            name: item.name,
            image: item.image,
            price: item.price,
            size: item.size,
            color: item.color,
            quantity: 1,
        }
    }

    /// Whether this line has the given identity.
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_uuid == key.product_uuid && self.size == key.size && self.color == key.color
    }

    /// The identity of this line.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_uuid: self.product_uuid,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Unit price multiplied by quantity, saturating at `u64::MAX`.
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(size: Option<&str>) -> NewCartLine {
        NewCartLine {
            product_uuid: Uuid::nil(),
            brand: "Nike".to_string(),
            name: "Air Max".to_string(),
            image: None,
            price: 12_50,
            size: size.map(str::to_string),
            color: Some("Black".to_string()),
        }
    }

    #[test]
    fn first_line_starts_at_quantity_one() {
        let line = CartLine::first(item(Some("42")));

        assert_eq!(line.quantity, 1);
        assert_eq!(line.price, 12_50);
    }

    #[test]
    fn matches_requires_every_selector() {
        let line = CartLine::first(item(Some("42")));

        assert!(line.matches(&item(Some("42")).key()));
        assert!(!line.matches(&item(Some("43")).key()));
        assert!(!line.matches(&item(None).key()));
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let mut line = CartLine::first(item(None));
        line.quantity = 3;

        assert_eq!(line.line_total(), 37_50);
    }
}
