use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display copy of a product as embedded in a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Stock of the sellable unit the line refers to.
    pub quantity: u32,
    pub price: i64,
    #[serde(default)]
    pub discount: i64,
    #[serde(default)]
    pub has_variant: bool,
}

/// Whether a cart line refers to the base product or to one of its variants.
///
/// On the wire this is the `additionalProperties` bag; a bag without a
/// `variantId` (or no bag at all) is a simple line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<PropertyBag>", into = "PropertyBag")]
pub enum LineItemKind {
    #[default]
    Simple,
    Variant(i64),
}

impl LineItemKind {
    pub fn variant_id(&self) -> Option<i64> {
        match self {
            LineItemKind::Simple => None,
            LineItemKind::Variant(id) => Some(*id),
        }
    }
}

impl From<Option<i64>> for LineItemKind {
    fn from(variant_id: Option<i64>) -> Self {
        variant_id.map_or(LineItemKind::Simple, LineItemKind::Variant)
    }
}

/// Wire form of [`LineItemKind`].
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyBag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variant_id: Option<i64>,
}

impl From<Option<PropertyBag>> for LineItemKind {
    fn from(bag: Option<PropertyBag>) -> Self {
        bag.and_then(|bag| bag.variant_id).into()
    }
}

impl From<LineItemKind> for PropertyBag {
    fn from(kind: LineItemKind) -> Self {
        PropertyBag {
            variant_id: kind.variant_id(),
        }
    }
}

/// One entry of a user's cart. Price fields are per-unit amounts set by the
/// server; a line is worth `final_price * quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: i64,
    pub product_id: i64,
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub price: i64,
    #[serde(default)]
    pub discount: i64,
    pub final_price: i64,
    #[serde(rename = "additionalProperties", default)]
    #[schema(value_type = Object)]
    pub kind: LineItemKind,
}

/// Variant selection by option name, e.g. `color = red`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct VariantProperties(pub BTreeMap<String, String>);

impl VariantProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact match against a variant's option set.
    pub fn matches(&self, other: &BTreeMap<String, String>) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Variant {
    pub id: i64,
    pub properties: BTreeMap<String, String>,
    pub price: i64,
    pub stock: u32,
}

/// Catalog entry held by the reference backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub thumbnail: Option<String>,
    pub price: i64,
    pub discount: i64,
    pub stock: u32,
    pub variants: Vec<Variant>,
}

impl Product {
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn variant(&self, variant_id: i64) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Unit price and stock of the sellable unit selected by `kind`.
    pub fn unit(&self, kind: LineItemKind) -> Option<(i64, u32)> {
        match kind {
            LineItemKind::Simple => Some((self.price, self.stock)),
            LineItemKind::Variant(id) => self.variant(id).map(|v| (v.price, v.stock)),
        }
    }
}
