//! In-memory product catalog served by the API.
//!
//! DESIGN
//! ======
//! The catalog is read once at startup and never mutated; handlers share it
//! through an `Arc`. Loading enforces that product ids are non-empty and
//! unique, since pages link by id when a product has no slug.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use client::state::products::{Product, resolve_product};

/// Errors produced while loading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Read { path: String, source: std::io::Error },

    /// The catalog file is not a JSON product list.
    #[error("failed to parse catalog {path}: {source}")]
    Parse { path: String, source: serde_json::Error },

    /// A product has an empty id.
    #[error("product at index {0} has an empty id")]
    EmptyId(usize),

    /// Two products share an id.
    #[error("duplicate product id {0:?}")]
    DuplicateId(String),
}

impl CatalogError {
    /// Whether the catalog file simply does not exist.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Read-only product list in source order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Validate and wrap a product list.
    ///
    /// # Errors
    ///
    /// Returns `EmptyId` or `DuplicateId` when ids are not usable as keys.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for (index, product) in products.iter().enumerate() {
            if product.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(index));
            }
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products: Arc::new(products) })
    }

    /// Parse a JSON array of products. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON, or a validation error.
    pub fn from_json(raw: &str, origin: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> =
            serde_json::from_str(raw).map_err(|source| CatalogError::Parse { path: origin.to_owned(), source })?;
        Self::new(products)
    }

    /// Read and parse the catalog file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Read` if the file cannot be read, otherwise as `from_json`.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let origin = path.display().to_string();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Read { path: origin.clone(), source })?;
        Self::from_json(&raw, &origin)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look a product up by slug, falling back to id.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&Product> {
        resolve_product(&self.products, key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
