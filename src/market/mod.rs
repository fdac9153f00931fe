//! Upstream market-data boundary.
//!
//! - [`types`] - Trending-list and price-sample wire types
//! - [`coingecko`] - CoinGecko v3 client implementing [`MarketDataProvider`]

mod coingecko;
mod types;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;

pub use coingecko::CoinGeckoClient;
pub use types::{PriceSample, TrendingCoin, QUOTE_CURRENCY};

/// Abstract market-data source.
///
/// Implementations fetch the current trending list and historical price
/// series; everything downstream of this trait is a pure function of what
/// it returns.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Current trending coins, in upstream rank order.
    async fn trending_coins(&self) -> Result<Vec<TrendingCoin>>;

    /// USD price samples over the closed day range `start 00:00:00` through
    /// `end 23:59:59` UTC. The sequence keeps the source's delivery order;
    /// it is not re-sorted here. An empty sequence is a valid answer.
    async fn price_series(
        &self,
        coin_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceSample>>;
}
