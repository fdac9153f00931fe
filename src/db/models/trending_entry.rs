use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trending observation (PostgreSQL).
///
/// Natural key is (coin_id, trending_date): a coin appears at most once
/// per day no matter how often ingestion runs. Rows are append-only,
/// never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub coin_id: String,
    pub trending_date: NaiveDate,
    pub coin_name: String,
}

impl TrendingEntry {
    pub fn new(coin_id: String, trending_date: NaiveDate, coin_name: String) -> Self {
        Self {
            coin_id,
            trending_date,
            coin_name,
        }
    }
}
