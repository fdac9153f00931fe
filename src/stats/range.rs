use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::market::PriceSample;

/// Summary statistics over one price-sample sequence.
///
/// `max_price_at` / `min_price_at` always point at an actual sample whose
/// price equals the reported extremum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeSummary {
    pub avg_price: f64,
    pub max_price: f64,
    pub max_price_at: DateTime<Utc>,
    pub min_price: f64,
    pub min_price_at: DateTime<Utc>,
}

/// Computes the unweighted mean and the extrema of a sample sequence.
///
/// Ties on the maximum (or minimum) resolve to the first sample in the
/// sequence's given order. Strict comparisons while scanning keep that
/// contract: a later equal price never replaces the winner. The input is
/// deliberately not re-sorted, so the order the source delivered governs.
pub fn summarize_range(samples: &[PriceSample]) -> Result<RangeSummary> {
    let (first, rest) = samples
        .split_first()
        .ok_or(Error::EmptyInput("price samples"))?;

    let mut sum = first.price;
    let mut max = *first;
    let mut min = *first;

    for sample in rest {
        sum += sample.price;
        if sample.price > max.price {
            max = *sample;
        }
        if sample.price < min.price {
            min = *sample;
        }
    }

    Ok(RangeSummary {
        avg_price: sum / samples.len() as f64,
        max_price: max.price,
        max_price_at: max.timestamp,
        min_price: min.price,
        min_price_at: min.timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(iso: &str, price: f64) -> PriceSample {
        PriceSample {
            timestamp: iso.parse().unwrap(),
            price,
        }
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = summarize_range(&[]).unwrap_err();
        assert_eq!(err.kind(), "empty_input");
    }

    #[test]
    fn test_single_sample() {
        let s = sample("2024-01-01T00:00:00Z", 42.0);
        let summary = summarize_range(&[s]).unwrap();
        assert_eq!(summary.avg_price, 42.0);
        assert_eq!(summary.max_price, 42.0);
        assert_eq!(summary.min_price, 42.0);
        assert_eq!(summary.max_price_at, s.timestamp);
        assert_eq!(summary.min_price_at, s.timestamp);
    }

    #[test]
    fn test_max_tie_resolves_to_first_occurrence() {
        let t1 = sample("2024-01-01T00:00:00Z", 5.0);
        let t2 = sample("2024-01-01T01:00:00Z", 9.0);
        let t3 = sample("2024-01-01T02:00:00Z", 9.0);
        let t4 = sample("2024-01-01T03:00:00Z", 1.0);
        let summary = summarize_range(&[t1, t2, t3, t4]).unwrap();
        assert_eq!(summary.max_price, 9.0);
        assert_eq!(summary.max_price_at, t2.timestamp);
        assert_eq!(summary.min_price, 1.0);
        assert_eq!(summary.min_price_at, t4.timestamp);
    }

    #[test]
    fn test_min_tie_resolves_to_first_occurrence() {
        let samples = [
            sample("2024-01-01T00:00:00Z", 3.0),
            sample("2024-01-01T01:00:00Z", 1.0),
            sample("2024-01-01T02:00:00Z", 1.0),
        ];
        let summary = summarize_range(&samples).unwrap();
        assert_eq!(summary.min_price_at, samples[1].timestamp);
    }

    #[test]
    fn test_sequence_order_governs_ties_not_time_order() {
        // The later timestamp comes first in the sequence and must win.
        let late = sample("2024-01-02T00:00:00Z", 7.0);
        let early = sample("2024-01-01T00:00:00Z", 7.0);
        let summary = summarize_range(&[late, early]).unwrap();
        assert_eq!(summary.max_price_at, late.timestamp);
        assert_eq!(summary.min_price_at, late.timestamp);
    }

    #[test]
    fn test_mean_is_unweighted() {
        let samples = [
            sample("2024-01-01T00:00:00Z", 100.0),
            sample("2024-01-01T12:00:00Z", 110.0),
            sample("2024-01-02T00:00:00Z", 90.0),
        ];
        let summary = summarize_range(&samples).unwrap();
        assert_eq!(summary.avg_price, 100.0);
    }
}
