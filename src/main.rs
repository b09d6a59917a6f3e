use std::path::Path;

use log::{error, info};

use coursera_scraper::browser::BrowserSession;
use coursera_scraper::config::Config;
use coursera_scraper::error::ScrapeError;
use coursera_scraper::profiles::{CoursePage, ExtractionProfile, ReviewPage};
use coursera_scraper::runner::CrawlRunner;
use coursera_scraper::sitemap;

fn main() {
    env_logger::init();

    let config = Config::load();
    if let Err(err) = run(&config) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), ScrapeError> {
    if config.scrape_courses {
        run_crawl(config, CoursePage, &config.course_sitemap)?;
    }
    if config.scrape_reviews {
        run_crawl(config, ReviewPage, &config.review_sitemap)?;
    }
    Ok(())
}

fn run_crawl<P: ExtractionProfile>(
    config: &Config,
    profile: P,
    sitemap_path: &str,
) -> Result<(), ScrapeError> {
    let kind = profile.kind();
    let urls = sitemap::load_urls(Path::new(sitemap_path))?;
    info!("{}: {} urls loaded from {}", kind, urls.len(), sitemap_path);

    let session = BrowserSession::launch(config.browser_config())?;
    let mut runner = CrawlRunner::new(session, profile, config.runner_options())?;
    let summary = runner.run(&urls)?;

    info!(
        "{}: {} scraped, {} failed out of {} urls",
        kind, summary.succeeded, summary.failed, summary.attempted
    );
    Ok(())
}
