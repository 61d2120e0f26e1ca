#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::config::setup_address;
use crate::storage::Config as StorageConfig;
use crate::storage::Storage;
use crate::storage::Store;
use crate::storage::setup;

mod api;
mod config;
mod graceful_shutdown;
mod notes;
mod root;
mod storage;
#[cfg(test)]
mod tests;

const DEFAULT_RUST_LOG: &str = "carevo_notes=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let app = setup_app(StorageConfig::DetectConfig).await?;

    let address = setup_address()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// # Errors
///
/// Will return `Err` if the notes document can not be prepared
pub async fn setup_app(config: StorageConfig) -> Result<Router> {
    let store = setup(config).await?;

    Ok(create_router(store))
}

/// Create the router for the notes API
fn create_router<S: Storage>(store: Store<S>) -> Router {
    Router::new()
        .route("/", get(root::root))
        .nest("/api", router::<S>())
        .fallback(root::not_found)
        .layer(Extension(store))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}
