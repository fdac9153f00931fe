//! Durable storage for trending entries.
//!
//! The store is the only shared mutable state in the system. Uniqueness
//! of (coin_id, trending_date) is enforced by the database itself via the
//! composite primary key, so a check-then-insert race between concurrent
//! ingesters can never produce two rows.

use async_trait::async_trait;
use chrono::NaiveDate;

pub mod models;
pub mod postgres;

pub use models::TrendingEntry;
pub use postgres::PostgresClient;

/// Result of a single trending-entry insert.
///
/// A duplicate is an expected outcome of overlapping ingestion runs, not
/// an error, so it gets its own variant instead of an error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

/// Handle to the trending-entry store, passed explicitly into the
/// ingestor and the distinct-coin query.
///
/// Connections are acquired per call and released on every exit path by
/// the implementation.
#[async_trait]
pub trait TrendingStore: Send + Sync {
    /// Whether an entry with this (coin_id, trending_date) already exists.
    async fn entry_exists(&self, coin_id: &str, trending_date: NaiveDate)
        -> anyhow::Result<bool>;

    /// Inserts one entry. Returns [`InsertOutcome::AlreadyExists`] when
    /// the composite key is already present (including a lost race after
    /// a passed existence check).
    async fn insert_entry(&self, entry: &TrendingEntry) -> anyhow::Result<InsertOutcome>;

    /// Deduplicated coin ids trending within the inclusive date range,
    /// ordered by coin id. Empty is a valid answer.
    async fn distinct_coins(&self, start: NaiveDate, end: NaiveDate)
        -> anyhow::Result<Vec<String>>;
}
