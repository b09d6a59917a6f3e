/// Browser session tests
/// These tests require Chrome/Chromium to be installed
/// Run with: cargo test --test browser_tests -- --ignored
use std::time::Duration;

use coursera_scraper::browser::wait::element_present;
use coursera_scraper::browser::{BrowserConfig, BrowserSession, CompositeWaitCondition};

#[test]
#[ignore] // Requires Chrome/Chromium
fn test_session_launch() {
    let result = BrowserSession::launch(BrowserConfig::default());
    assert!(
        result.is_ok(),
        "Failed to launch browser session. Is Chrome/Chromium installed?"
    );
}

#[test]
#[ignore] // Requires Chrome/Chromium and internet
fn test_navigation_and_ready_wait() {
    let session = BrowserSession::launch(BrowserConfig::default())
        .expect("Chrome/Chromium not installed");

    session.navigate("https://example.com").unwrap();

    let ready = CompositeWaitCondition::new(vec![element_present("h1"), element_present("p")]);
    assert!(session.wait_for_ready(&ready).is_ok());

    let html = session.page_html().unwrap();
    assert!(html.contains("Example Domain"));
}

#[test]
#[ignore] // Requires Chrome/Chromium and internet
fn test_ready_wait_times_out_on_missing_element() {
    let config = BrowserConfig {
        page_timeout: Duration::from_secs(2),
        ..BrowserConfig::default()
    };
    let session = BrowserSession::launch(config).expect("Chrome/Chromium not installed");

    session.navigate("https://example.com").unwrap();

    let never = CompositeWaitCondition::new(vec![element_present("div.DoesNotExist")]);
    assert!(session.wait_for_ready(&never).is_err());
}

#[test]
#[ignore] // Requires Chrome/Chromium and internet
fn test_scroll_to_bottom() {
    let session = BrowserSession::launch(BrowserConfig::default())
        .expect("Chrome/Chromium not installed");

    session.navigate("https://example.com").unwrap();
    assert!(session.scroll_to_bottom().is_ok());
}

#[test]
#[ignore] // Requires Chrome/Chromium
fn test_session_recycles_after_nth_visit() {
    let config = BrowserConfig {
        recycle_every: 2,
        ..BrowserConfig::default()
    };
    let mut session = BrowserSession::launch(config).expect("Chrome/Chromium not installed");

    let first_process = session.tab().get_target_id().clone();

    session.record_visit().unwrap();
    session.record_visit().unwrap();

    let second_process = session.tab().get_target_id().clone();
    assert_ne!(
        first_process, second_process,
        "the session used after the recycle point must be a fresh one"
    );
    assert_eq!(session.visit_count(), 2);
}
