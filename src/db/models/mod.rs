mod trending_entry;

pub use trending_entry::TrendingEntry;
