//! Product catalog state and lookup rules for catalog pages.
//!
//! DESIGN
//! ======
//! `ProductsState` is the read-only product source shared through context.
//! Pages never mutate `items`; they derive a `ProductLookup` and a related
//! list from it on each render.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use serde::{Deserialize, Serialize};

/// Number of alternatives shown under a product.
pub const RELATED_PRODUCT_LIMIT: usize = 4;

/// A catalog entry as served by `/api/products`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Key used in product URLs: the slug when present, otherwise the id.
    pub fn route_key(&self) -> &str {
        self.slug.as_deref().filter(|s| !s.is_empty()).unwrap_or(&self.id)
    }

    pub fn href(&self) -> String {
        format!("/product/{}", self.route_key())
    }
}

/// Outcome of resolving a route key against the product source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductLookup<'a> {
    /// The source is still fetching; no lookup was attempted.
    Loading,
    Found(&'a Product),
    NotFound,
}

/// Shared product source populated once per app mount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductsState {
    pub items: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ProductsState {
    fn default() -> Self {
        Self { items: Vec::new(), loading: true, error: None }
    }
}

impl ProductsState {
    /// Resolve `key`, deferring until the source has loaded.
    pub fn lookup(&self, key: &str) -> ProductLookup<'_> {
        if self.loading {
            return ProductLookup::Loading;
        }
        match resolve_product(&self.items, key) {
            Some(product) => ProductLookup::Found(product),
            None => ProductLookup::NotFound,
        }
    }

    /// Replace the source contents after a fetch attempt.
    pub fn apply_fetch(&mut self, result: Result<Vec<Product>, String>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                self.items.clear();
                self.error = Some(e);
            }
        }
    }
}

/// Find a product by slug, falling back to id.
///
/// Slug matches win over id matches anywhere in the list.
pub fn resolve_product<'a>(products: &'a [Product], key: &str) -> Option<&'a Product> {
    products
        .iter()
        .find(|p| p.slug.as_deref() == Some(key))
        .or_else(|| products.iter().find(|p| p.id == key))
}

/// Up to `RELATED_PRODUCT_LIMIT` other products, in source order.
pub fn related_products<'a>(products: &'a [Product], current: &Product) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.id != current.id)
        .take(RELATED_PRODUCT_LIMIT)
        .collect()
}
