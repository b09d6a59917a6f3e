use std::ffi::OsStr;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use headless_chrome::{Browser, LaunchOptions, Tab};
use log::{debug, info};
use rand::seq::SliceRandom;

use super::config::BrowserConfig;
use super::wait::{element_present, CompositeWaitCondition};
use crate::error::ScrapeError;

/// Realistic Chrome user agents; one is picked at random per session unless
/// the configuration pins a specific string.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
];

/// Interval between readiness polls while waiting for a page to load
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One live headless Chrome session: a browser process plus the single tab
/// all page loads go through.
///
/// Exactly one session is live at a time; the crawl runner owns it
/// exclusively. The underlying browser process is closed when the session is
/// dropped, so cleanup happens on every exit path.
pub struct BrowserSession {
    // Field order matters: the tab must drop before the browser that owns it.
    tab: Arc<Tab>,
    browser: Browser,
    config: BrowserConfig,
    visit_count: u64,
}

impl BrowserSession {
    /// Launch a fresh browser process. Failure here is fatal to a crawl:
    /// nothing can proceed without a session.
    pub fn launch(config: BrowserConfig) -> Result<Self, ScrapeError> {
        let user_agent = config.user_agent.clone().unwrap_or_else(random_user_agent);
        let ua_arg = format!("--user-agent={}", user_agent);

        let args: Vec<&OsStr> = vec![
            OsStr::new("--disable-blink-features=AutomationControlled"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--no-sandbox"),
            OsStr::new(&ua_arg),
        ];

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some(config.window_size))
            .args(args)
            .build()
            .map_err(|e| ScrapeError::SessionInit(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| ScrapeError::SessionInit(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::SessionInit(e.to_string()))?;

        debug!("browser session launched with user agent: {}", user_agent);

        Ok(Self {
            tab,
            browser,
            config,
            visit_count: 0,
        })
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn visit_count(&self) -> u64 {
        self.visit_count
    }

    /// Navigate the session's tab to a URL
    pub fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| ScrapeError::Navigation(format!("{}: {}", url, e)))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::Navigation(format!("{}: {}", url, e)))?;
        Ok(())
    }

    /// Poll a composite readiness condition until it passes or the configured
    /// page timeout elapses.
    pub fn wait_for_ready(
        &self,
        condition: &CompositeWaitCondition<Tab>,
    ) -> Result<(), ScrapeError> {
        self.poll(condition, "page-ready condition")
    }

    /// Wait for a single element matching the CSS selector to be present
    pub fn wait_for_selector(&self, selector: &str) -> Result<(), ScrapeError> {
        let condition = CompositeWaitCondition::new(vec![element_present(selector)]);
        self.poll(&condition, selector)
    }

    fn poll(
        &self,
        condition: &CompositeWaitCondition<Tab>,
        what: &str,
    ) -> Result<(), ScrapeError> {
        let start = Instant::now();
        loop {
            if condition.evaluate(&self.tab) {
                return Ok(());
            }
            if start.elapsed() > self.config.page_timeout {
                return Err(ScrapeError::PageLoadTimeout(format!(
                    "{} not met within {:?}",
                    what, self.config.page_timeout
                )));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Scroll to the bottom of the page in fixed increments, pausing between
    /// steps so lazily-loaded content has a chance to attach. The scrollable
    /// height is re-read every iteration, so content that appears as a result
    /// of scrolling extends the pass.
    pub fn scroll_to_bottom(&self) -> Result<(), ScrapeError> {
        let steps = drive_scroll(
            self.config.scroll_increment,
            self.config.scroll_pause,
            || self.scroll_height(),
            |offset| self.scroll_to(offset),
        )?;
        debug!("scrolled to bottom in {} steps", steps);
        Ok(())
    }

    fn scroll_height(&self) -> Result<u64, ScrapeError> {
        let result = self
            .tab
            .evaluate("document.body.scrollHeight", false)
            .map_err(|e| ScrapeError::Extraction(e.to_string()))?;
        result
            .value
            .and_then(|v| v.as_f64())
            .map(|h| h as u64)
            .ok_or_else(|| ScrapeError::Extraction("scrollHeight returned no value".into()))
    }

    fn scroll_to(&self, offset: u64) -> Result<(), ScrapeError> {
        let script = format!(
            "window.scrollTo(0, Math.min({}, document.body.scrollHeight));",
            offset
        );
        self.tab
            .evaluate(&script, false)
            .map_err(|e| ScrapeError::Extraction(e.to_string()))?;
        Ok(())
    }

    /// Get the full HTML content of the current page
    pub fn page_html(&self) -> Result<String, ScrapeError> {
        self.tab
            .get_content()
            .map_err(|e| ScrapeError::Extraction(e.to_string()))
    }

    /// Execute an in-page script whose final expression is a
    /// `JSON.stringify(...)` of the value to extract, and parse the result.
    pub fn evaluate_json(&self, script: &str) -> Result<serde_json::Value, ScrapeError> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| ScrapeError::Extraction(e.to_string()))?;
        let raw = result
            .value
            .and_then(|v| v.as_str().map(str::to_owned))
            .ok_or_else(|| ScrapeError::Extraction("extraction script returned no value".into()))?;
        serde_json::from_str(&raw)
            .map_err(|e| ScrapeError::Extraction(format!("malformed extraction payload: {}", e)))
    }

    /// Run an in-page snippet that locates and clicks an optional control.
    /// The snippet itself must guard against the control being absent; this
    /// only fails when the script cannot be executed at all.
    pub fn click_if_present(&self, script: &str) -> Result<(), ScrapeError> {
        self.tab
            .evaluate(script, false)
            .map_err(|e| ScrapeError::Extraction(e.to_string()))?;
        Ok(())
    }

    /// Count a completed page visit and recycle the browser process after
    /// every Nth visit. Recycling mitigates memory growth and fingerprint
    /// accumulation in long-lived sessions.
    pub fn record_visit(&mut self) -> Result<(), ScrapeError> {
        self.visit_count += 1;
        if due_for_recycle(self.visit_count, self.config.recycle_every) {
            info!("recycling browser session after {} visits", self.visit_count);
            let mut fresh = Self::launch(self.config.clone())?;
            fresh.visit_count = self.visit_count;
            // Old browser process is closed when the previous value drops.
            *self = fresh;
        }
        Ok(())
    }

    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }
}

fn random_user_agent() -> String {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(USER_AGENTS[0])
        .to_string()
}

fn due_for_recycle(visit_count: u64, every: u64) -> bool {
    every > 0 && visit_count % every == 0
}

/// Incremental scroll loop, factored out so the offset progression can be
/// tested without a browser. Each iteration re-probes the scrollable height,
/// computes the next offset as `min(current + increment, height)` and stops
/// once the offset no longer advances. Returns the number of scroll calls.
fn drive_scroll<H, S>(
    increment: u64,
    pause: Duration,
    mut probe_height: H,
    mut scroll_to: S,
) -> Result<usize, ScrapeError>
where
    H: FnMut() -> Result<u64, ScrapeError>,
    S: FnMut(u64) -> Result<(), ScrapeError>,
{
    let mut current = 0u64;
    let mut steps = 0usize;
    loop {
        let height = probe_height()?;
        let next = (current + increment).min(height);
        if next == current {
            return Ok(steps);
        }
        scroll_to(next)?;
        current = next;
        steps += 1;
        thread::sleep(pause);
    }
}
