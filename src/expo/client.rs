use std::time::Duration;

use anyhow::Context;
use url::Url;

use crate::api::routes::coins::DistinctCoinsResponse;
use crate::config::ExpoSettings;
use crate::error::{Error, Result};
use crate::stats::DailySummary;

/// Typed HTTP client for the collector service.
///
/// A non-success answer from the collector is carried through as an
/// upstream failure with the collector's own status and body, so the expo
/// handlers forward it verbatim.
pub struct CollectorClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CollectorClient {
    pub fn new(settings: &ExpoSettings) -> anyhow::Result<Self> {
        let mut base = settings.collector_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).context("Invalid collector_url")?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| Error::UpstreamFetch {
            status: None,
            message: format!("invalid collector url: {e}"),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::UpstreamFetch {
                status: Some(status.as_u16()),
                message: body,
            });
        }
        serde_json::from_str(&body).map_err(|e| Error::UpstreamFetch {
            status: None,
            message: format!("malformed collector response: {e}"),
        })
    }

    /// `GET /distinct_coins/` on the collector.
    pub async fn distinct_coins(&self, start: &str, end: &str) -> Result<DistinctCoinsResponse> {
        let mut url = self.endpoint("distinct_coins/")?;
        url.query_pairs_mut()
            .append_pair("start_date", start)
            .append_pair("end_date", end);
        self.get_json(url).await
    }

    /// `GET /aboutcoinDaily/` on the collector.
    pub async fn daily_summaries(
        &self,
        coin_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<DailySummary>> {
        let mut url = self.endpoint("aboutcoinDaily/")?;
        url.query_pairs_mut()
            .append_pair("coin_id", coin_id)
            .append_pair("startDate", start)
            .append_pair("endDate", end);
        self.get_json(url).await
    }
}
