use chrono::NaiveDate;

use crate::db::TrendingStore;
use crate::error::{Error, Result};
use crate::utils::ensure_ordered;

/// Distinct coin ids trending within the inclusive `[start, end]` range.
///
/// An inverted range is rejected before the store is touched. An empty
/// result is `Ok` — whether "no coins" is worth a 404 is the HTTP
/// layer's call, not this one's.
pub async fn distinct_coins(
    store: &dyn TrendingStore,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<String>> {
    ensure_ordered(start, end)?;

    store
        .distinct_coins(start, end)
        .await
        .map_err(|e| Error::StoreQuery(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trending::ingest::tests::MemoryStore;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected_before_the_store() {
        let store = MemoryStore::default();
        let err = distinct_coins(&store, date("2024-01-02"), date("2024-01-01"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[tokio::test]
    async fn test_single_day_range_returns_only_that_date() {
        let store = MemoryStore::default();
        store.seed("bitcoin", date("2024-01-01"));
        store.seed("pepe", date("2024-01-02"));

        let day = date("2024-01-01");
        let coins = distinct_coins(&store, day, day).await.unwrap();
        assert_eq!(coins, vec!["bitcoin"]);
    }

    #[tokio::test]
    async fn test_empty_range_is_ok_not_an_error() {
        let store = MemoryStore::default();
        let coins = distinct_coins(&store, date("2024-01-01"), date("2024-01-31"))
            .await
            .unwrap();
        assert!(coins.is_empty());
    }

    #[tokio::test]
    async fn test_coins_are_deduplicated_across_days() {
        let store = MemoryStore::default();
        store.seed("bitcoin", date("2024-01-01"));
        store.seed("bitcoin", date("2024-01-02"));
        store.seed("pepe", date("2024-01-02"));

        let coins = distinct_coins(&store, date("2024-01-01"), date("2024-01-31"))
            .await
            .unwrap();
        assert_eq!(coins, vec!["bitcoin", "pepe"]);
    }
}
