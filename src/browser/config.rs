use std::time::Duration;

/// Configuration for browser sessions
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// Custom user agent; `None` picks a realistic one at random per session
    pub user_agent: Option<String>,

    /// Time to wait for a page to load its first batch of async content
    pub page_timeout: Duration,

    /// Pause between incremental scroll steps
    pub scroll_pause: Duration,

    /// Pixel increment for incremental scrolling
    pub scroll_increment: u64,

    /// Destroy and relaunch the browser after this many page visits.
    /// Zero disables recycling.
    pub recycle_every: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            user_agent: None,
            page_timeout: Duration::from_secs(10),
            scroll_pause: Duration::from_millis(100),
            scroll_increment: 300,
            recycle_every: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert_eq!(config.window_size, (1920, 1080));
        assert_eq!(config.page_timeout, Duration::from_secs(10));
        assert_eq!(config.scroll_increment, 300);
        assert_eq!(config.recycle_every, 10);
        assert!(config.user_agent.is_none());
    }
}
