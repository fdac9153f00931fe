//! Utility functions shared by the collector and exposition services.

mod dates;

pub use dates::{
    ensure_ordered, format_utc_seconds, parse_date, range_epoch_seconds, CIVIL_FORMAT, DATE_FORMAT,
};
