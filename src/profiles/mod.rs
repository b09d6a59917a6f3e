//! Per-page-type extraction profiles
//!
//! A profile bundles everything the runner needs to handle one kind of page:
//! a URL-shape validator, the composite readiness condition, pre-extraction
//! page interaction (expanding collapsed sections, jumping pagination) and
//! the in-page extraction script with its typed parse.
//!
//! Structural selectors live in the profiles as configuration data; the
//! browser session only knows how to evaluate them.

pub mod course;
pub mod review;

use headless_chrome::Tab;
use serde::Serialize;

use crate::browser::{BrowserSession, CompositeWaitCondition};
use crate::error::ScrapeError;

pub use course::CoursePage;
pub use review::ReviewPage;

/// The per-page-type bundle of URL validation, readiness condition and
/// structured-data extraction logic.
pub trait ExtractionProfile {
    type Record: Serialize;

    /// Output subdirectory name (`course` or `review`)
    fn kind(&self) -> &'static str;

    /// Reject URLs that do not match the expected shape, before navigation
    fn validate_url(&self, url: &str) -> Result<(), ScrapeError>;

    /// Filesystem-safe identifier derived from the URL path segment
    fn slug(&self, url: &str) -> String;

    /// Composite condition that must pass before the page is considered loaded
    fn ready_condition(&self) -> CompositeWaitCondition<Tab>;

    /// Interact with the page before extraction (expand sections, paginate).
    /// Must tolerate the controls being absent.
    fn prepare_page(&self, session: &BrowserSession) -> Result<(), ScrapeError>;

    /// Run the in-page extraction script and parse its payload
    fn extract(&self, session: &BrowserSession) -> Result<Self::Record, ScrapeError>;
}

pub(crate) const COURSE_PATH_MARKER: &str = "coursera.org/learn/";
pub(crate) const COURSE_URL_PREFIX: &str = "https://www.coursera.org/learn/";
