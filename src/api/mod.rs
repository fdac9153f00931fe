//! Collector HTTP surface: thin axum wrappers over the core.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

mod error;
pub mod routes;
mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/update/", post(routes::update::run_update))
        .route(
            "/aboutcoin/",
            get(routes::stats::about_coin_get).post(routes::stats::about_coin_post),
        )
        .route(
            "/aboutcoinDaily/",
            get(routes::stats::about_coin_daily_get).post(routes::stats::about_coin_daily_post),
        )
        .route("/distinct_coins/", get(routes::coins::distinct_coins))
        .route("/health", get(routes::health::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
