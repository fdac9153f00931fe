use async_trait::async_trait;
use chrono::NaiveDate;
use log::error;

use crate::db::postgres::PostgresClient;
use crate::db::{InsertOutcome, TrendingEntry, TrendingStore};

#[async_trait]
impl TrendingStore for PostgresClient {
    async fn entry_exists(
        &self,
        coin_id: &str,
        trending_date: NaiveDate,
    ) -> anyhow::Result<bool> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "SELECT EXISTS (
                    SELECT 1 FROM trending.coins
                    WHERE coin_id = $1 AND trending_date = $2
                )",
                &[&coin_id, &trending_date],
            )
            .await?;

        Ok(row.get(0))
    }

    async fn insert_entry(&self, entry: &TrendingEntry) -> anyhow::Result<InsertOutcome> {
        let client = self.pool.get().await?;
        // The composite primary key is the uniqueness authority; a lost
        // race against another ingester degrades to AlreadyExists here.
        let inserted = client
            .execute(
                "INSERT INTO trending.coins (coin_id, trending_date, coin_name)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (coin_id, trending_date) DO NOTHING",
                &[&entry.coin_id, &entry.trending_date, &entry.coin_name],
            )
            .await
            .map_err(|e| {
                error!("Failed to insert trending entry {}: {:?}", entry.coin_id, e);
                e
            })?;

        if inserted == 1 {
            Ok(InsertOutcome::Inserted)
        } else {
            Ok(InsertOutcome::AlreadyExists)
        }
    }

    async fn distinct_coins(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<String>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT DISTINCT coin_id FROM trending.coins
                 WHERE trending_date >= $1 AND trending_date <= $2
                 ORDER BY coin_id",
                &[&start, &end],
            )
            .await?;

        Ok(rows.iter().map(|row| row.get("coin_id")).collect())
    }
}
