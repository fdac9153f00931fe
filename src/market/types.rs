use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single quote currency everything is priced in.
pub const QUOTE_CURRENCY: &str = "usd";

/// One coin from the upstream trending list, in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub name: String,
}

/// A single USD price observation.
///
/// Samples are ephemeral: fetched per query, aggregated, then dropped.
/// They are not guaranteed to arrive time-sorted; aggregation tie-breaks
/// are defined over the order the source delivered them in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSample {
    /// Observation time, millisecond precision, UTC.
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}
