//! Job to refresh the trending-coin table from the market data source.
//!
//! Shares the ingestion path with `POST /update/`: fetch the trending
//! list, keep the top N in rank order, upsert for today (UTC).

use anyhow::Result;
use chrono::Utc;
use log::info;

use crate::db::TrendingStore;
use crate::market::MarketDataProvider;
use crate::trending;

pub async fn run(
    store: &dyn TrendingStore,
    provider: &dyn MarketDataProvider,
    top_n: usize,
) -> Result<()> {
    info!("Starting refresh_trending job...");

    let start = std::time::Instant::now();

    let mut coins = provider.trending_coins().await?;
    coins.truncate(top_n);

    let today = Utc::now().date_naive();
    let report = trending::ingest(store, &coins, today).await;

    info!(
        "Completed refresh_trending job in {:?} ({} inserted, {} skipped, {} failed)",
        start.elapsed(),
        report.inserted.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(())
}
