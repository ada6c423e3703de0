//! In-memory product catalog. The admin endpoints mutate the same
//! collection the storefront reads.

use rand::Rng;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::domain::aggregates::product::{Product, ProductVariant};
use crate::domain::events::{self, DomainEvent, ProductEvent};
use crate::domain::value_objects::Quantity;

/// Admin creation payload. Only the name is required; everything else gets
/// a demo default.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub variants: Option<Vec<ProductVariant>>,
}

/// Admin partial update. Absent fields keep their current value; the id is
/// immutable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub stock: Option<u32>,
    pub featured: Option<bool>,
    pub variants: Option<Vec<ProductVariant>>,
}

pub struct CatalogStore {
    products: RwLock<Vec<Product>>,
}

impl CatalogStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    pub fn list(&self) -> Vec<Product> {
        self.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.read().iter().find(|p| p.id == id).cloned()
    }

    /// Same-category products excluding the one asked about; falls back to
    /// the first three catalog entries when the category has no peers.
    /// Unknown ids yield an empty list.
    pub fn related(&self, id: &str) -> Vec<Product> {
        let products = self.read();
        let Some(product) = products.iter().find(|p| p.id == id) else {
            return vec![];
        };
        let related: Vec<Product> = products
            .iter()
            .filter(|p| p.id != id && p.category == product.category)
            .cloned()
            .collect();
        if related.is_empty() {
            products.iter().take(3).cloned().collect()
        } else {
            related
        }
    }

    pub fn insert(&self, new: NewProduct) -> Product {
        let product = Product {
            id: format!("p_{}", Uuid::new_v4().simple()),
            name: new.name,
            description: new.description.unwrap_or_default(),
            price: new.price.unwrap_or(Decimal::ZERO),
            category: new.category.unwrap_or_else(|| "Other".into()),
            images: new.images.unwrap_or_else(|| {
                vec![format!(
                    "https://picsum.photos/400/400?random={}",
                    rand::thread_rng().gen_range(0..100)
                )]
            }),
            stock: Quantity::new(new.stock.unwrap_or(0)),
            rating: 0.0,
            reviews: 0,
            featured: new.featured.unwrap_or(false),
            variants: new.variants.unwrap_or_default(),
        };
        events::publish(&DomainEvent::Product(ProductEvent::Created {
            product_id: product.id.clone(),
            name: product.name.clone(),
        }));
        self.write().push(product.clone());
        product
    }

    pub fn update(&self, id: &str, patch: ProductPatch) -> Option<Product> {
        let mut products = self.write();
        let product = products.iter_mut().find(|p| p.id == id)?;
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(images) = patch.images {
            product.images = images;
        }
        if let Some(stock) = patch.stock {
            product.stock = Quantity::new(stock);
        }
        if let Some(featured) = patch.featured {
            product.featured = featured;
        }
        if let Some(variants) = patch.variants {
            product.variants = variants;
        }
        let updated = product.clone();
        events::publish(&DomainEvent::Product(ProductEvent::Updated {
            product_id: updated.id.clone(),
        }));
        Some(updated)
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut products = self.write();
        let before = products.len();
        products.retain(|p| p.id != id);
        let removed = products.len() < before;
        if removed {
            events::publish(&DomainEvent::Product(ProductEvent::Deleted {
                product_id: id.to_string(),
            }));
        }
        removed
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
