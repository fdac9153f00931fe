use chrono::NaiveDate;
use log::{error, info};
use serde::Serialize;

use crate::db::{InsertOutcome, TrendingEntry, TrendingStore};
use crate::market::TrendingCoin;

/// Outcome of one ingestion batch.
///
/// `skipped` is the normal result of overlapping ingestion windows, not a
/// failure. `failed` carries per-entry store errors; the entries that did
/// commit stay committed.
#[derive(Debug, Default, Serialize)]
pub struct IngestReport {
    pub inserted: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<IngestFailure>,
}

#[derive(Debug, Serialize)]
pub struct IngestFailure {
    pub coin_id: String,
    pub reason: String,
}

/// Ingests a ranked trending batch for the given date.
///
/// Each entry is an independent check-then-insert: a store failure on one
/// coin is recorded and the loop moves on, so partial success is a valid
/// outcome and the function itself never fails. Truncating the batch to a
/// top-N is the caller's job.
pub async fn ingest(
    store: &dyn TrendingStore,
    batch: &[TrendingCoin],
    as_of: NaiveDate,
) -> IngestReport {
    let mut report = IngestReport::default();

    for coin in batch {
        match store.entry_exists(&coin.id, as_of).await {
            Ok(true) => {
                info!("Coin {} already trending on {}, skipping", coin.id, as_of);
                report.skipped.push(coin.id.clone());
                continue;
            },
            Ok(false) => {},
            Err(e) => {
                error!("Existence check failed for coin {}: {:#}", coin.id, e);
                report.failed.push(IngestFailure {
                    coin_id: coin.id.clone(),
                    reason: e.to_string(),
                });
                continue;
            },
        }

        let entry = TrendingEntry::new(coin.id.clone(), as_of, coin.name.clone());
        match store.insert_entry(&entry).await {
            Ok(InsertOutcome::Inserted) => report.inserted.push(coin.id.clone()),
            // Another ingester won the race between our check and insert.
            Ok(InsertOutcome::AlreadyExists) => report.skipped.push(coin.id.clone()),
            Err(e) => {
                error!("Failed to store trending coin {}: {:#}", coin.id, e);
                report.failed.push(IngestFailure {
                    coin_id: coin.id.clone(),
                    reason: e.to_string(),
                });
            },
        }
    }

    report
}
