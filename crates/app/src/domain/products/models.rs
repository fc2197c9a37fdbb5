//! Product Models

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Image shown when a product has none of its own.
pub const FALLBACK_IMAGE_SRC: &str = "/assets/logo.png";

/// Product image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub src: String,
    pub alt: String,
}

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub brand: String,
    pub name: String,
    pub price: u64,
    pub stock: u32,
    pub images: Vec<ProductImage>,
}

impl Product {
    /// The image to display for this product: the first image, or the store
    /// logo captioned with the brand.
    #[must_use]
    pub fn display_image(&self) -> ProductImage {
        self.images.first().cloned().unwrap_or_else(|| ProductImage {
            src: FALLBACK_IMAGE_SRC.to_string(),
            alt: self.brand.clone(),
        })
    }
}
