//! Public landing page with the product grid.

use leptos::prelude::*;

use crate::components::loading_spinner::LoadingSpinner;
use crate::components::product_card::ProductCard;
use crate::state::products::ProductsState;

#[component]
pub fn HomePage() -> impl IntoView {
    let products = expect_context::<RwSignal<ProductsState>>();

    view! {
        <div class="home-page">
            <header class="site-header">
                <nav class="site-nav">
                    <a class="site-nav__brand" href="/">"Showroom"</a>
                    <a class="site-nav__link" href="/admin/login">"Admin"</a>
                </nav>
            </header>
            <main class="home-page__main">
                <h1 class="home-page__title">"Our Products"</h1>
                <Show when=move || !products.get().loading fallback=|| view! { <LoadingSpinner/> }>
                    <Show when=move || products.get().error.is_some()>
                        <p class="home-page__error">"Products are unavailable right now. Please try again later."</p>
                    </Show>
                    <div class="product-grid">
                        {move || {
                            products
                                .get()
                                .items
                                .into_iter()
                                .map(|product| view! { <ProductCard product=product/> })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                </Show>
            </main>
        </div>
    }
}
