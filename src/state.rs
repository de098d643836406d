//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! only carries the read-only catalog, so cloning is an `Arc` bump.

use crate::catalog::Catalog;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub catalog: Catalog,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}
