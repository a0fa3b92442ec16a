use async_trait::async_trait;

use super::error::CartError;
use crate::models::{CartLineItem, VariantProperties};

/// Request to put units of a product into the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCart {
    pub product_id: i64,
    pub quantity: u32,
    pub variant_properties: Option<VariantProperties>,
}

impl AddToCart {
    /// One unit of the base product.
    pub fn new(product_id: i64) -> Self {
        Self {
            product_id,
            quantity: 1,
            variant_properties: None,
        }
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn variant(mut self, properties: VariantProperties) -> Self {
        self.variant_properties = Some(properties).filter(|p| !p.is_empty());
        self
    }
}

/// Remote cart operations consumed by [`CartStore`](super::CartStore).
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Full cart of the authenticated user, in server order.
    async fn list_items(&self) -> Result<Vec<CartLineItem>, CartError>;

    /// Creates a line or increments the existing one for the same
    /// product and variant.
    async fn add_item(&self, request: &AddToCart) -> Result<CartLineItem, CartError>;

    /// Sets the quantity of a line by its id. Zero removes the line.
    async fn update_item(&self, item_id: i64, quantity: u32) -> Result<CartLineItem, CartError>;
}
