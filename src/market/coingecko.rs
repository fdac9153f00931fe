use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use log::debug;
use moka::future::Cache;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

use crate::config::MarketSettings;
use crate::error::{Error, Result};
use crate::market::{MarketDataProvider, PriceSample, TrendingCoin, QUOTE_CURRENCY};
use crate::utils::range_epoch_seconds;

/// CoinGecko v3 client.
///
/// Serializes upstream calls behind a minimum inter-request interval (the
/// free tier rate limit) and caches market-chart responses per
/// (coin, range) so repeated queries inside the TTL never hit the
/// network. No automatic retries: a failed call is surfaced as-is.
pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
    chart_cache: Cache<String, Arc<Vec<PriceSample>>>,
}

#[derive(Deserialize)]
struct TrendingResponse {
    coins: Vec<TrendingEntry>,
}

#[derive(Deserialize)]
struct TrendingEntry {
    item: TrendingItem,
}

#[derive(Deserialize)]
struct TrendingItem {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct MarketChartResponse {
    #[serde(default)]
    prices: Vec<Vec<f64>>,
}

impl CoinGeckoClient {
    pub fn new(settings: &MarketSettings) -> anyhow::Result<Self> {
        // Url::join treats the last path segment as a file unless the base
        // ends with a slash.
        let mut base = settings.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).context("Invalid market base_url")?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let chart_cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(settings.chart_cache_ttl_secs))
            .build();

        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key.clone(),
            min_interval: Duration::from_millis(settings.min_request_interval_ms),
            last_request: Mutex::new(None),
            chart_cache,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.join(path).map_err(|e| Error::UpstreamFetch {
            status: None,
            message: format!("invalid endpoint url: {e}"),
        })?;
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("x_cg_pro_api_key", key);
        }
        Ok(url)
    }

    /// Waits out the minimum inter-request interval. The lock is held
    /// across the sleep so concurrent callers queue up instead of
    /// bursting past the limit.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        self.pace().await;
        debug!("GET {}", url.path());
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::UpstreamFetch {
                status: Some(status.as_u16()),
                message: body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoClient {
    async fn trending_coins(&self) -> Result<Vec<TrendingCoin>> {
        let url = self.endpoint("search/trending")?;
        let body = self.get_text(url).await?;
        parse_trending(&body)
    }

    async fn price_series(
        &self,
        coin_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceSample>> {
        let cache_key = format!("{coin_id}:{start}:{end}");
        if let Some(cached) = self.chart_cache.get(&cache_key).await {
            return Ok(cached.as_ref().clone());
        }

        let (from, to) = range_epoch_seconds(start, end);
        let mut url = self.endpoint(&format!("coins/{coin_id}/market_chart/range"))?;
        url.query_pairs_mut()
            .append_pair("vs_currency", QUOTE_CURRENCY)
            .append_pair("from", &from.to_string())
            .append_pair("to", &to.to_string());

        let body = self.get_text(url).await?;
        let samples = parse_market_chart(&body)?;

        self.chart_cache
            .insert(cache_key, Arc::new(samples.clone()))
            .await;
        Ok(samples)
    }
}

/// Parses `/search/trending`: `{"coins": [{"item": {"id", "name", ...}}]}`.
/// Rank order of the upstream list is preserved.
fn parse_trending(body: &str) -> Result<Vec<TrendingCoin>> {
    let response: TrendingResponse = serde_json::from_str(body).map_err(|e| malformed(&e))?;
    Ok(response
        .coins
        .into_iter()
        .map(|entry| TrendingCoin {
            id: entry.item.id,
            name: entry.item.name,
        })
        .collect())
}

/// Parses `/coins/{id}/market_chart/range`:
/// `{"prices": [[ms_epoch, price], ...], ...}`.
///
/// One malformed point rejects the whole payload; partially parsed series
/// never reach the aggregation code.
fn parse_market_chart(body: &str) -> Result<Vec<PriceSample>> {
    let response: MarketChartResponse = serde_json::from_str(body).map_err(|e| malformed(&e))?;

    let mut samples = Vec::with_capacity(response.prices.len());
    for point in &response.prices {
        let [millis, price] = point.as_slice() else {
            return Err(malformed(&format!(
                "price point has {} elements, expected 2",
                point.len()
            )));
        };
        let timestamp = to_millis_epoch(*millis)
            .ok_or_else(|| malformed(&format!("unrepresentable timestamp {millis}")))?;
        if !price.is_finite() {
            return Err(malformed(&format!("non-finite price {price}")));
        }
        samples.push(PriceSample {
            timestamp,
            price: *price,
        });
    }
    Ok(samples)
}

fn to_millis_epoch(millis: f64) -> Option<DateTime<chrono::Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

fn malformed(detail: &impl ToString) -> Error {
    Error::UpstreamFetch {
        status: None,
        message: format!("malformed upstream payload: {}", detail.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>) -> CoinGeckoClient {
        let settings = MarketSettings {
            api_key: api_key.map(String::from),
            ..MarketSettings::default()
        };
        CoinGeckoClient::new(&settings).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_api_version_path() {
        let url = client(None).endpoint("search/trending").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.coingecko.com/api/v3/search/trending"
        );
    }

    #[test]
    fn test_endpoint_appends_pro_api_key() {
        let url = client(Some("k-123")).endpoint("search/trending").unwrap();
        assert!(url.query().unwrap().contains("x_cg_pro_api_key=k-123"));
    }

    #[test]
    fn test_parse_trending_preserves_rank_order() {
        let body = r#"{"coins": [
            {"item": {"id": "pepe", "name": "Pepe", "market_cap_rank": 40}},
            {"item": {"id": "bitcoin", "name": "Bitcoin", "market_cap_rank": 1}}
        ]}"#;
        let coins = parse_trending(body).unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].id, "pepe");
        assert_eq!(coins[1].name, "Bitcoin");
    }

    #[test]
    fn test_parse_market_chart() {
        let body = r#"{
            "prices": [[1704067200000, 42000.5], [1704070800000, 42100.0]],
            "market_caps": [],
            "total_volumes": []
        }"#;
        let samples = parse_market_chart(body).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].price, 42000.5);
        assert_eq!(
            samples[0].timestamp,
            "2024-01-01T00:00:00Z".parse::<DateTime<chrono::Utc>>().unwrap()
        );
    }

    #[test]
    fn test_parse_market_chart_empty_prices_is_valid() {
        assert!(parse_market_chart(r#"{"prices": []}"#).unwrap().is_empty());
        assert!(parse_market_chart(r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_market_chart_rejects_wrong_arity() {
        let err = parse_market_chart(r#"{"prices": [[1704067200000]]}"#).unwrap_err();
        assert_eq!(err.kind(), "upstream_fetch");
    }

    #[test]
    fn test_parse_market_chart_rejects_non_numeric() {
        let err = parse_market_chart(r#"{"prices": [["soon", 1.0]]}"#).unwrap_err();
        assert_eq!(err.kind(), "upstream_fetch");
    }

    #[test]
    fn test_parse_market_chart_rejects_unrepresentable_timestamp() {
        let err = parse_market_chart(r#"{"prices": [[1e300, 1.0]]}"#).unwrap_err();
        assert_eq!(err.kind(), "upstream_fetch");
    }

    #[test]
    fn test_parse_trending_rejects_malformed_payload() {
        let err = parse_trending(r#"{"coins": [{"no_item": {}}]}"#).unwrap_err();
        assert_eq!(err.kind(), "upstream_fetch");
    }
}
