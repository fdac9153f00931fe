//! Trending-entry ingestion and queries.
//!
//! - [`ingest`] - Idempotent per-day upsert of a ranked trending batch
//! - [`query`] - Distinct-coin lookups over the stored history

mod ingest;
mod query;

pub use ingest::{ingest, IngestFailure, IngestReport};
pub use query::distinct_coins;
