//! Exposition service: composes the collector over HTTP and derives the
//! taux curve from its daily statistics.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

mod client;
mod routes;

pub use client::CollectorClient;
pub use routes::ExpoState;

pub fn router(state: Arc<ExpoState>) -> Router {
    Router::new()
        .route("/trending_range/", post(routes::trending_range))
        .route("/coin_price_curve/", get(routes::coin_price_curve))
        .route("/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
