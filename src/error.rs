//! Error types shared by the schedule pipeline stages.

/// Failure inside one of the record-shaping stages.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("record is missing required field '{0}'")]
    MissingField(String),
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// Failure while loading or decoding a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("failed to read feed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("feed body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid feed URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl FeedError {
    /// The load step that failed, for user-facing diagnostics.
    pub fn step(&self) -> &'static str {
        match self {
            FeedError::Parse(_) => "parsing",
            FeedError::Io(_) => "reading",
            FeedError::Fetch(_) | FeedError::InvalidUrl { .. } => "fetching",
        }
    }
}
