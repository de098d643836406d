//! Product detail page with related products.
//!
//! SYSTEM CONTEXT
//! ==============
//! Routed at `/product/:slug`. The key is resolved against the shared
//! `ProductsState`: slug first, then id. Lookup waits for the source to finish
//! loading; an unknown key renders a terminal not-found view with a link home.

#[cfg(test)]
#[path = "product_test.rs"]
mod product_test;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_params_map;

use crate::components::loading_spinner::LoadingSpinner;
use crate::components::product_card::ProductCard;
use crate::state::products::{Product, ProductLookup, ProductsState, related_products};

/// Sales lines shown in the contact call-to-action as `(label, tel: href)`.
pub const SALES_PHONES: [(&str, &str); 2] = [
    ("+961 71 981 996", "tel:+96171981996"),
    ("+225 01 50 19 11 62", "tel:+2250150191162"),
];

const EXPERTISE: [&str; 4] = [
    "Over 30 years of manufacturing experience",
    "Premium quality materials and craftsmanship",
    "Custom fabrication to your specifications",
    "Professional installation available",
];

/// What the page renders for a key, with owned data for the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ProductView {
    Loading,
    NotFound,
    Detail { product: Product, related: Vec<Product> },
}

pub(crate) fn product_view(state: &ProductsState, key: &str) -> ProductView {
    match state.lookup(key) {
        ProductLookup::Loading => ProductView::Loading,
        ProductLookup::NotFound => ProductView::NotFound,
        ProductLookup::Found(product) => ProductView::Detail {
            product: product.clone(),
            related: related_products(&state.items, product).into_iter().cloned().collect(),
        },
    }
}

#[component]
pub fn ProductPage() -> impl IntoView {
    let products = expect_context::<RwSignal<ProductsState>>();
    let params = use_params_map();

    move || {
        let key = params.with(|p| p.get("slug")).unwrap_or_default();
        match products.with(|state| product_view(state, &key)) {
            ProductView::Loading => view! {
                <div class="product-page product-page--loading">
                    <LoadingSpinner/>
                </div>
            }
            .into_any(),
            ProductView::NotFound => view! { <ProductNotFound/> }.into_any(),
            ProductView::Detail { product, related } => {
                view! { <ProductDetail product=product related=related/> }.into_any()
            }
        }
    }
}

#[component]
fn ProductNotFound() -> impl IntoView {
    view! {
        <div class="product-page product-page--missing">
            <Title text="Product Not Found"/>
            <h1 class="product-page__title">"Product Not Found"</h1>
            <a class="product-page__home-link" href="/">"Return to Home"</a>
        </div>
    }
}

#[component]
fn ProductDetail(product: Product, related: Vec<Product>) -> impl IntoView {
    let image = product.image_url.clone().map(|src| {
        view! { <img class="product-page__image" src=src alt=product.name.clone()/> }
    });

    view! {
        <div class="product-page">
            <Title text=product.name.clone()/>
            <header class="site-header site-header--fixed">
                <nav class="site-nav">
                    <a class="site-nav__back" href="/">"← Back to Home"</a>
                </nav>
            </header>

            <main class="product-page__main">
                <div class="product-page__layout">
                    <div class="product-page__media">{image}</div>

                    <div class="product-page__content">
                        <h1 class="product-page__title">{product.name.clone()}</h1>
                        <p class="product-page__description">{product.description.clone()}</p>

                        <section class="product-contact">
                            <h2>"Interested in this product?"</h2>
                            <p>"Contact us today to discuss your requirements and receive a detailed quote."</p>
                            <div class="product-contact__phones">
                                {SALES_PHONES
                                    .iter()
                                    .map(|(label, href)| view! { <a class="product-contact__phone" href=*href>{*label}</a> })
                                    .collect::<Vec<_>>()}
                            </div>
                        </section>

                        <section class="product-expertise">
                            <h3>"Our Expertise"</h3>
                            <ul>
                                {EXPERTISE.iter().map(|line| view! { <li>{*line}</li> }).collect::<Vec<_>>()}
                            </ul>
                        </section>
                    </div>
                </div>

                <section class="product-related">
                    <h2 class="product-related__title">"Other Products"</h2>
                    <div class="product-grid product-grid--related">
                        {related
                            .into_iter()
                            .map(|p| view! { <ProductCard product=p compact=true/> })
                            .collect::<Vec<_>>()}
                    </div>
                </section>
            </main>
        </div>
    }
}
