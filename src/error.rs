use std::path::PathBuf;

/// Failures of the scraping and extraction steps.
///
/// `ConnectionFailure` and `LinkNotFound` are handled per train line, the other
/// variants per downloaded file.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The request failed or the server answered with a non-success status
    #[error("could not fetch {url}: {reason}")]
    ConnectionFailure { url: String, reason: String },

    /// The page was fetched but no anchor carries the expected text
    #[error("no links containing the text '{text}'")]
    LinkNotFound { text: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not read PDF {}: {message}", path.display())]
    Pdf { path: PathBuf, message: String },
}

impl ScrapeError {
    pub fn connection(url: impl Into<String>, reason: impl ToString) -> Self {
        ScrapeError::ConnectionFailure {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error only affects the train line being processed.
    pub fn is_recoverable_per_line(&self) -> bool {
        matches!(
            self,
            ScrapeError::ConnectionFailure { .. } | ScrapeError::LinkNotFound { .. }
        )
    }
}
