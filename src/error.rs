use std::io;

/// Errors that can occur while scraping course and review pages
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Invalid url format: {0}")]
    InvalidUrlFormat(String),

    #[error("Took too long to load page: {0}")]
    PageLoadTimeout(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Browser session failed to start: {0}")]
    SessionInit(String),

    #[error("Sitemap error: {0}")]
    Sitemap(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// A session-init fault means no further pages can be visited,
    /// so the runner must not swallow it at the per-url boundary.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScrapeError::SessionInit(_))
    }
}
