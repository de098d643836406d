//! Product catalog routes.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use client::state::products::Product;

use crate::state::AppState;

/// `GET /api/products` returns the whole catalog in source order.
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.products().to_vec())
}

/// `GET /api/products/{key}` returns one product by slug, falling back to id.
pub async fn get_product(State(state): State<AppState>, Path(key): Path<String>) -> Result<Json<Product>, StatusCode> {
    match state.catalog.resolve(&key) {
        Some(product) => Ok(Json(product.clone())),
        None => {
            tracing::debug!(%key, "product not found");
            Err(StatusCode::NOT_FOUND)
        }
    }
}
