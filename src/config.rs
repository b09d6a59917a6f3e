use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::browser::BrowserConfig;
use crate::runner::RunnerOptions;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Root directory for `course/` and `review/` output trees
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Crawl the course landing pages listed in `course_sitemap`
    #[serde(default = "default_true")]
    pub scrape_courses: bool,

    /// Crawl the review pages listed in `review_sitemap`
    #[serde(default = "default_true")]
    pub scrape_reviews: bool,

    #[serde(default = "default_course_sitemap")]
    pub course_sitemap: String,

    #[serde(default = "default_review_sitemap")]
    pub review_sitemap: String,

    /// Persist the raw page snapshot per URL
    #[serde(default = "default_true")]
    pub save_html: bool,

    /// Persist the serialized extraction record per URL
    #[serde(default = "default_true")]
    pub save_json: bool,

    #[serde(default)]
    pub browser: BrowserSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Time to wait for a page's async content, in seconds
    #[serde(default = "default_page_timeout")]
    pub page_timeout_secs: u64,

    /// Pause between scroll increments, in milliseconds
    #[serde(default = "default_scroll_pause")]
    pub scroll_pause_ms: u64,

    /// Pixel increment for incremental scrolling
    #[serde(default = "default_scroll_increment")]
    pub scroll_increment_px: u64,

    /// Relaunch the browser after this many page visits; zero disables
    #[serde(default = "default_recycle_every")]
    pub recycle_every: u64,

    /// Pin a specific user agent instead of picking one at random
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_true() -> bool {
    true
}
fn default_output_dir() -> String {
    ".".to_string()
}
fn default_course_sitemap() -> String {
    "sitemap/courses.xml".to_string()
}
fn default_review_sitemap() -> String {
    "sitemap/courses-reviews.xml".to_string()
}
fn default_page_timeout() -> u64 {
    10
}
fn default_scroll_pause() -> u64 {
    100
}
fn default_scroll_increment() -> u64 {
    300
}
fn default_recycle_every() -> u64 {
    10
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            page_timeout_secs: 10,
            scroll_pause_ms: 100,
            scroll_increment_px: 300,
            recycle_every: 10,
            user_agent: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            scrape_courses: true,
            scrape_reviews: true,
            course_sitemap: default_course_sitemap(),
            review_sitemap: default_review_sitemap(),
            save_html: true,
            save_json: true,
            browser: BrowserSettings::default(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(cfg) = toml::from_str::<Config>(&content) {
                    return cfg;
                }
            }
        }
        Self::default()
    }

    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            headless: self.browser.headless,
            window_size: (1920, 1080),
            user_agent: self.browser.user_agent.clone(),
            page_timeout: Duration::from_secs(self.browser.page_timeout_secs),
            scroll_pause: Duration::from_millis(self.browser.scroll_pause_ms),
            scroll_increment: self.browser.scroll_increment_px,
            recycle_every: self.browser.recycle_every,
        }
    }

    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            output_root: PathBuf::from(&self.output_dir),
            save_html: self.save_html,
            save_json: self.save_json,
        }
    }
}
