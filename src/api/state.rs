use std::sync::Arc;

use crate::db::PostgresClient;
use crate::market::MarketDataProvider;

/// Shared application state available to all route handlers via axum's
/// `State` extractor.
pub struct AppState {
    /// Trending-entry store, also queried by the health endpoint.
    pub postgres: PostgresClient,

    /// Upstream market-data source.
    pub provider: Arc<dyn MarketDataProvider>,

    /// How many of the trending list to ingest per run, in rank order.
    pub trending_top_n: usize,
}
