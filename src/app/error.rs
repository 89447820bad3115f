use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("No internet connection. Check your network and try again.")]
    Offline,

    #[error("The connection is too slow. Please try again.")]
    Timeout,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Could not connect to the news server")]
    UnknownConnectionFailure,

    #[error("No prior articles to paginate from")]
    NoPriorArticles,

    #[error("Cache miss: {0}")]
    CacheMiss(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Article not found: {0}")]
    ArticleNotFound(String),
}

impl NewsError {
    /// Whether this error came from talking to the news API, as opposed to
    /// local storage or configuration.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            NewsError::Offline
                | NewsError::Timeout
                | NewsError::Http { .. }
                | NewsError::UnknownConnectionFailure
        )
    }
}

impl From<reqwest::Error> for NewsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NewsError::Timeout
        } else {
            tracing::debug!(error = %err.without_url(), "transport failure");
            NewsError::UnknownConnectionFailure
        }
    }
}

pub type Result<T> = std::result::Result<T, NewsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_displays_server_message() {
        let err = NewsError::Http {
            status: 500,
            message: "server error".into(),
        };
        assert_eq!(err.to_string(), "server error");
    }

    #[test]
    fn test_fetch_failure_classification() {
        assert!(NewsError::Offline.is_fetch_failure());
        assert!(NewsError::Timeout.is_fetch_failure());
        assert!(NewsError::UnknownConnectionFailure.is_fetch_failure());
        assert!(!NewsError::NoPriorArticles.is_fetch_failure());
        assert!(!NewsError::CacheMiss("home".into()).is_fetch_failure());
    }
}
