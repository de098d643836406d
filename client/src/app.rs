//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{home::HomePage, login::LoginPage, oauth_callback::OAuthCallbackPage, product::ProductPage};
use crate::state::{auth::AuthState, products::ProductsState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session and product-source contexts and sets up routing. The
/// catalog is fetched once, after hydration.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let products = RwSignal::new(ProductsState::default());

    provide_context(auth);
    provide_context(products);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_products().await;
        match &result {
            Ok(items) => log::debug!("loaded {} products", items.len()),
            Err(e) => log::warn!("product fetch failed: {e}"),
        }
        products.update(|s| s.apply_fetch(result));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/showroom.css"/>
        <Title text="Showroom"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("product"), ParamSegment("slug")) view=ProductPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("login")) view=LoginPage/>
                <Route
                    path=(StaticSegment("auth"), StaticSegment("google"), StaticSegment("callback"))
                    view=OAuthCallbackPage
                />
            </Routes>
        </Router>
    }
}
