//! Pure price-series aggregation.
//!
//! This module is organized into focused submodules:
//!
//! - [`range`] - Whole-range summary (mean, extrema with timestamps)
//! - [`daily`] - UTC calendar-day bucketing
//! - [`ratio`] - Baseline-normalized ratio ("taux") curve

mod daily;
mod range;
mod ratio;

pub use daily::{bucketize_daily, DailySummary};
pub use range::{summarize_range, RangeSummary};
pub use ratio::{build_ratio_curve, RatioPoint};
