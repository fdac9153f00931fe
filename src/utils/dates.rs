use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{Error, Result};

/// Wire format for dates in requests and responses.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for UTC timestamps (second precision).
pub const CIVIL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a `YYYY-MM-DD` date string, rejecting anything that deviates
/// from the exact format (including non-padded or overlong years).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    if s.len() != 10 {
        return Err(invalid_date());
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| invalid_date())
}

fn invalid_date() -> Error {
    Error::Validation("Invalid date format. Use 'YYYY-MM-DD'.".to_string())
}

/// Rejects inverted date ranges before any store or upstream call.
pub fn ensure_ordered(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(Error::Validation(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    Ok(())
}

/// UTC epoch seconds covering the closed day range: `start` at 00:00:00
/// through `end` at 23:59:59.
pub fn range_epoch_seconds(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    let from = start.and_time(NaiveTime::MIN).and_utc().timestamp();
    // 86_399 = seconds from midnight to 23:59:59
    let to = end.and_time(NaiveTime::MIN).and_utc().timestamp() + 86_399;
    (from, to)
}

/// Formats a UTC timestamp as `YYYY-MM-DD HH:MM:SS` for the wire.
pub fn format_utc_seconds(ts: DateTime<Utc>) -> String {
    ts.format(CIVIL_FORMAT).to_string()
}
