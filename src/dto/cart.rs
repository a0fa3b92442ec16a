use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the add-to-cart and update-quantity requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct QuantityRequest {
    pub quantity: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartQuery {
    pub product_id: i64,
    /// JSON object of option name to value, e.g. `{"color":"red"}`.
    pub variant_properties: Option<String>,
}
