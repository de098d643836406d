//! Card linking to a single product.
//!
//! DESIGN
//! ======
//! Used by the home grid and the "Other Products" strip so both link to
//! products the same way (slug first, id as fallback).

use leptos::prelude::*;

use crate::state::products::Product;

/// A clickable card showing a product's image and name.
#[component]
pub fn ProductCard(product: Product, #[prop(optional)] compact: bool) -> impl IntoView {
    let href = product.href();
    let image = product.image_url.clone().map(|src| {
        view! { <img class="product-card__image" src=src alt=product.name.clone()/> }
    });

    view! {
        <a class="product-card" class:product-card--compact=compact href=href>
            {image}
            <div class="product-card__body">
                <h3 class="product-card__name">{product.name.clone()}</h3>
            </div>
        </a>
    }
}
