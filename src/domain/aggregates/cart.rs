//! Shopping cart aggregate.
//!
//! Lines are keyed by `(product_id, selected_variant_id)`: the same product
//! in two different variants occupies two distinct lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::product::Product;
use crate::domain::value_objects::{Currency, Money, Quantity};

/// One cart line: a product snapshot plus quantity and variant selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_variant_id: Option<String>,
}

impl CartLine {
    pub fn effective_unit_price(&self) -> Decimal {
        self.product.effective_price(self.selected_variant_id.as_deref())
    }

    pub fn line_total(&self) -> Decimal {
        self.effective_unit_price() * Decimal::from(self.quantity.value())
    }

    fn matches(&self, product_id: &str, variant_id: Option<&str>) -> bool {
        self.product.id == product_id && self.selected_variant_id.as_deref() == variant_id
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLine>,
}

impl Cart {
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Merges into an existing `(product, variant)` line or appends a new
    /// one with quantity 1. Insertion order is preserved.
    pub fn add_item(&mut self, product: Product, variant_id: Option<String>) {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|l| l.matches(&product.id, variant_id.as_deref()))
        {
            line.quantity = line.quantity.add(1);
            return;
        }
        self.items.push(CartLine {
            product,
            quantity: Quantity::new(1),
            selected_variant_id: variant_id,
        });
    }

    /// Sets a line's quantity; anything at or below zero removes the line.
    /// Unknown lines are left alone.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64, variant_id: Option<&str>) {
        if quantity <= 0 {
            self.remove_item(product_id, variant_id);
            return;
        }
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|l| l.matches(product_id, variant_id))
        {
            line.quantity = Quantity::new(quantity as u32);
        }
    }

    pub fn remove_item(&mut self, product_id: &str, variant_id: Option<&str>) {
        self.items.retain(|l| !l.matches(product_id, variant_id));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of effective unit price × quantity over all lines, in USD.
    pub fn total(&self) -> Money {
        self.items.iter().fold(Money::zero(Currency::Usd), |acc, line| {
            let line_total = Money::usd(line.effective_unit_price()).multiply(line.quantity.value());
            acc.add(&line_total).unwrap_or(acc)
        })
    }
}
