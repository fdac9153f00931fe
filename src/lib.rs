pub mod api;
pub mod config;
pub mod cron;
pub mod db;
pub mod error;
pub mod expo;
pub mod market;
pub mod stats;
pub mod trending;
pub mod utils;

pub use config::Settings;
pub use cron::CronScheduler;
pub use db::{PostgresClient, TrendingStore};
pub use error::{Error, Result};
pub use market::{CoinGeckoClient, MarketDataProvider};
