use config::{Config, ConfigError, File};
use serde::Deserialize;

/// PostgreSQL connection configuration.
///
/// Backs the trending-entry store: one row per (coin_id, trending_date),
/// append-only.
#[derive(Debug, Deserialize, Clone)]
pub struct PostgresSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

fn default_pool_size() -> usize {
    16
}

/// Upstream market-data source (CoinGecko v3) configuration.
///
/// The free tier enforces a minimum delay between calls; the interval and
/// the response cache TTL are tunable here so deployments with a pro key
/// can tighten them.
#[derive(Debug, Deserialize, Clone)]
pub struct MarketSettings {
    #[serde(default = "default_market_base_url")]
    pub base_url: String,
    /// Pro tier API key, appended to every request when present.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Minimum delay between consecutive upstream calls.
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,
    /// TTL for cached market-chart responses, keyed by (coin, range).
    #[serde(default = "default_chart_cache_ttl_secs")]
    pub chart_cache_ttl_secs: u64,
    /// How many of the upstream trending list to ingest, in rank order.
    #[serde(default = "default_trending_top_n")]
    pub trending_top_n: usize,
}

fn default_market_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_min_request_interval_ms() -> u64 {
    1200
}

fn default_chart_cache_ttl_secs() -> u64 {
    300
}

fn default_trending_top_n() -> usize {
    10
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            base_url: default_market_base_url(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            min_request_interval_ms: default_min_request_interval_ms(),
            chart_cache_ttl_secs: default_chart_cache_ttl_secs(),
            trending_top_n: default_trending_top_n(),
        }
    }
}

/// Collector service (ingestion + statistics API) configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct CollectorSettings {
    #[serde(default = "default_collector_listen")]
    pub listen: String,
}

fn default_collector_listen() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            listen: default_collector_listen(),
        }
    }
}

/// Exposition service configuration.
///
/// The expo service composes the collector over HTTP; it needs the
/// collector's base URL.
#[derive(Debug, Deserialize, Clone)]
pub struct ExpoSettings {
    #[serde(default = "default_expo_listen")]
    pub listen: String,
    #[serde(default = "default_collector_url")]
    pub collector_url: String,
}

fn default_expo_listen() -> String {
    "0.0.0.0:8001".to_string()
}

fn default_collector_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for ExpoSettings {
    fn default() -> Self {
        Self {
            listen: default_expo_listen(),
            collector_url: default_collector_url(),
        }
    }
}

/// Periodic trending-refresh configuration.
///
/// Optional: when the section is absent the collector only ingests on
/// explicit `POST /update/` calls.
#[derive(Debug, Deserialize, Clone)]
pub struct CronSettings {
    #[serde(default = "default_trending_refresh_interval_secs")]
    pub trending_refresh_interval_secs: u64,
}

fn default_trending_refresh_interval_secs() -> u64 {
    3600
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub postgres: PostgresSettings,
    #[serde(default)]
    pub market: MarketSettings,
    #[serde(default)]
    pub collector: CollectorSettings,
    #[serde(default)]
    pub expo: ExpoSettings,
    #[serde(default)]
    pub cron: Option<CronSettings>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }
}
