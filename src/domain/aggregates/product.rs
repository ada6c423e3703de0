//! Catalog products and their purchasable variants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Quantity, Sku};

/// A catalog product as served by the storefront API.
///
/// Base `price` is quoted in USD; a selected variant adds its signed
/// `price_modifier` on top.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub images: Vec<String>,
    pub stock: Quantity,
    pub rating: f64,
    pub reviews: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ProductVariant>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub name: String,
    pub sku: Sku,
    pub price_modifier: Decimal,
    pub stock: Quantity,
}

impl Product {
    pub fn variant(&self, variant_id: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Unit price with the matched variant's modifier applied. An unknown
    /// or absent variant id contributes nothing.
    pub fn effective_price(&self, variant_id: Option<&str>) -> Decimal {
        let modifier = variant_id
            .and_then(|id| self.variant(id))
            .map(|v| v.price_modifier)
            .unwrap_or(Decimal::ZERO);
        self.price + modifier
    }

    pub fn is_in_stock(&self) -> bool {
        !self.stock.is_zero()
    }
}
