use thiserror::Error;

/// Crate-wide error taxonomy.
///
/// Every failure a caller can act on gets its own variant; the HTTP layer
/// maps variants to status codes and renders `kind()` alongside the
/// message. Store internals use `anyhow` and are wrapped into
/// [`Error::StoreWrite`] / [`Error::StoreQuery`] at the domain boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input: bad date strings, inverted date ranges.
    #[error("{0}")]
    Validation(String),

    /// The upstream data source answered with a non-success status,
    /// failed at the transport level, or returned a payload that could
    /// not be understood.
    #[error("upstream request failed: {message}")]
    UpstreamFetch {
        status: Option<u16>,
        message: String,
    },

    /// Aggregation was asked to summarize an empty series.
    #[error("no {0} available for the given range")]
    EmptyInput(&'static str),

    /// Ratio normalization against a zero baseline.
    #[error("{0}")]
    DivisionByZero(&'static str),

    /// A trending entry could not be written.
    #[error("store write failed: {0}")]
    StoreWrite(String),

    /// A read against the store failed.
    #[error("store query failed: {0}")]
    StoreQuery(String),

    /// The query matched nothing where something was required.
    #[error("{0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable machine-readable tag, rendered next to the message on the
    /// wire so clients can branch without parsing prose.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::UpstreamFetch { .. } => "upstream_fetch",
            Error::EmptyInput(_) => "empty_input",
            Error::DivisionByZero(_) => "division_by_zero",
            Error::StoreWrite(_) => "store_write",
            Error::StoreQuery(_) => "store_query",
            Error::NotFound(_) => "not_found",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::UpstreamFetch {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}
