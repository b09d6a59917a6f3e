//! Browser automation module for scraping JavaScript-heavy pages
//!
//! This module drives a headless Chrome session to load pages whose content
//! only appears after client-side rendering, lazy loading, or user
//! interaction. It owns exactly one live session at a time and recycles it
//! periodically to bound memory growth in long crawls.
//!
//! # Example
//!
//! ```no_run
//! use coursera_scraper::browser::{BrowserConfig, BrowserSession, CompositeWaitCondition};
//! use coursera_scraper::browser::wait::element_present;
//!
//! # fn main() -> Result<(), coursera_scraper::error::ScrapeError> {
//! let session = BrowserSession::launch(BrowserConfig::default())?;
//! session.navigate("https://example.com")?;
//!
//! let ready = CompositeWaitCondition::new(vec![element_present("h1")]);
//! session.wait_for_ready(&ready)?;
//!
//! let html = session.page_html()?;
//! println!("Extracted {} bytes of HTML", html.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod session;
pub mod wait;

// Re-export main types for convenience
pub use config::BrowserConfig;
pub use session::BrowserSession;
pub use wait::CompositeWaitCondition;
