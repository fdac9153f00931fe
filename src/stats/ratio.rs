use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::stats::DailySummary;

/// One point of the normalized price curve: the day's average price
/// divided by the baseline day's average price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioPoint {
    pub date: NaiveDate,
    #[serde(rename = "taux")]
    pub ratio: f64,
}

/// Derives the ratio curve from a date-ascending daily-summary sequence.
///
/// The first element is the baseline, so the first point's ratio is
/// exactly 1.0. A zero baseline average is rejected instead of letting
/// infinities or NaNs into the output.
pub fn build_ratio_curve(daily: &[DailySummary]) -> Result<Vec<RatioPoint>> {
    let baseline = daily
        .first()
        .ok_or(Error::EmptyInput("daily summaries"))?
        .avg_price;

    if baseline == 0.0 {
        return Err(Error::DivisionByZero(
            "baseline day has a zero average price",
        ));
    }

    Ok(daily
        .iter()
        .map(|day| RatioPoint {
            date: day.date,
            ratio: day.avg_price / baseline,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, avg: f64) -> DailySummary {
        DailySummary {
            date: date.parse().unwrap(),
            avg_price: avg,
            max_price: avg,
            min_price: avg,
        }
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = build_ratio_curve(&[]).unwrap_err();
        assert_eq!(err.kind(), "empty_input");
    }

    #[test]
    fn test_baseline_ratio_is_exactly_one() {
        let curve = build_ratio_curve(&[day("2024-01-01", 105.0)]).unwrap();
        assert_eq!(curve.len(), 1);
        assert_eq!(curve[0].ratio, 1.0);
    }

    #[test]
    fn test_ratios_are_relative_to_first_day() {
        let daily = [
            day("2024-01-01", 105.0),
            day("2024-01-02", 90.0),
            day("2024-01-03", 210.0),
        ];
        let curve = build_ratio_curve(&daily).unwrap();
        assert_eq!(curve[0].ratio, 1.0);
        assert_eq!(curve[1].ratio, 90.0 / 105.0);
        assert_eq!(curve[2].ratio, 2.0);
    }

    #[test]
    fn test_output_preserves_input_order() {
        let daily = [day("2024-01-01", 50.0), day("2024-01-02", 25.0)];
        let curve = build_ratio_curve(&daily).unwrap();
        let dates: Vec<NaiveDate> = curve.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![daily[0].date, daily[1].date]);
    }

    #[test]
    fn test_zero_baseline_is_rejected() {
        let daily = [day("2024-01-01", 0.0), day("2024-01-02", 10.0)];
        let err = build_ratio_curve(&daily).unwrap_err();
        assert_eq!(err.kind(), "division_by_zero");
    }

    #[test]
    fn test_serializes_ratio_as_taux() {
        let curve = build_ratio_curve(&[day("2024-01-01", 2.0)]).unwrap();
        let json = serde_json::to_value(&curve[0]).unwrap();
        assert_eq!(json["taux"], 1.0);
        assert_eq!(json["date"], "2024-01-01");
    }
}
