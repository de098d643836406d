#![recursion_limit = "256"]

mod catalog;
mod config;
mod routes;
mod state;

use std::net::SocketAddr;

use leptos::prelude::get_configuration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");
    let leptos_options = get_configuration(None)
        .expect("leptos configuration")
        .leptos_options;

    // A missing catalog is non-fatal: the site serves an empty product list.
    let catalog = match catalog::Catalog::load(&config.catalog_path).await {
        Ok(catalog) => {
            tracing::info!(products = catalog.len(), path = %config.catalog_path.display(), "catalog loaded");
            if catalog.is_empty() {
                tracing::warn!("catalog has no products");
            }
            catalog
        }
        Err(e) if e.is_missing() => {
            tracing::warn!(path = %config.catalog_path.display(), "catalog file not found, serving empty catalog");
            catalog::Catalog::default()
        }
        Err(e) => panic!("catalog load failed: {e}"),
    };

    let addr = config
        .port
        .map_or(leptos_options.site_addr, |port| SocketAddr::from(([0, 0, 0, 0], port)));
    let app = routes::app(state::AppState::new(catalog), leptos_options);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "showroom listening");
    axum::serve(listener, app).await.expect("server failed");
}
