use thiserror::Error;

/// Errors raised by the fetching, extraction and archival layers.
///
/// Only `Io`, `Csv` and `Json` are fatal to a run; everything else is
/// absorbed per record by the orchestrators.
#[derive(Debug, Error)]
pub enum ArchiverError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("no archived snapshot found for {0}")]
    RecordNotFound(String),

    #[error("archival service refused to capture {url}: {reason}")]
    CaptureFailure { url: String, reason: String },

    #[error("malformed page {url}: {reason}")]
    MalformedPage { url: String, reason: String },

    #[error("invalid snapshot timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("invalid issue label: {0:?}")]
    InvalidIssueLabel(String),

    #[error("invalid CSS selector {0:?}")]
    Selector(String),

    #[error("unexpected archival index response: {0}")]
    IndexResponse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ArchiverError {
    pub fn network(url: &str, source: reqwest::Error) -> Self {
        ArchiverError::Network {
            url: url.to_string(),
            source,
        }
    }

    pub fn malformed(url: &str, reason: impl Into<String>) -> Self {
        ArchiverError::MalformedPage {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiverError>;
