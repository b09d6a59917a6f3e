use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::browser::BrowserSession;
use crate::error::ScrapeError;
use crate::models::ScrapeRecord;
use crate::profiles::ExtractionProfile;

/// Persistence toggles and output location for one crawl
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub output_root: PathBuf,
    pub save_html: bool,
    pub save_json: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("."),
            save_html: true,
            save_json: true,
        }
    }
}

/// Counts for one completed crawl over a URL list
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Artifacts produced by one successful page visit. Fields are `None` when
/// the corresponding persistence toggle is off.
pub struct PageArtifacts {
    pub slug: String,
    pub html: Option<String>,
    pub json: Option<serde_json::Value>,
}

/// Writes artifacts and error-log lines for one profile kind.
///
/// Layout under the output root:
/// `<kind>/html/<slug>.html`, `<kind>/json/<slug>.json`, `<kind>/error.log`.
/// Artifacts are overwritten on re-run; the error log is append-only.
pub struct OutputSink {
    dir: PathBuf,
}

impl OutputSink {
    pub fn new(root: &Path, kind: &str) -> Result<Self, ScrapeError> {
        let dir = root.join(kind);
        fs::create_dir_all(dir.join("html"))?;
        fs::create_dir_all(dir.join("json"))?;
        Ok(Self { dir })
    }

    pub fn persist(&self, page: &PageArtifacts) -> Result<(), ScrapeError> {
        if let Some(html) = &page.html {
            let path = self.dir.join("html").join(format!("{}.html", page.slug));
            fs::write(path, html)?;
            info!("{} - html saved.", page.slug);
        }
        if let Some(json) = &page.json {
            let path = self.dir.join("json").join(format!("{}.json", page.slug));
            fs::write(path, serde_json::to_string(json)?)?;
            info!("{} - json saved.", page.slug);
        }
        Ok(())
    }

    /// Append one `"url","message"` line to the error log. Failures are
    /// silent apart from this line; if even the append fails, warn and move
    /// on rather than abort the crawl.
    pub fn log_failure(&self, url: &str, err: &ScrapeError) {
        let line = format!("\"{}\",\"{}\"\n", url, err);
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join("error.log"))
            .and_then(|mut f| f.write_all(line.as_bytes()));
        if let Err(io_err) = result {
            warn!("could not write error log entry for {}: {}", url, io_err);
        }
    }
}

/// Drive one crawl over a URL list, persisting artifacts through `sink` and
/// isolating per-url failures: a bad page gets an error-log line and the run
/// moves on. Only a session-init fault aborts, since no further page can be
/// visited without a browser.
pub fn run_batch<F>(
    urls: &[String],
    sink: &OutputSink,
    mut scrape: F,
) -> Result<RunSummary, ScrapeError>
where
    F: FnMut(&str) -> Result<PageArtifacts, ScrapeError>,
{
    let total = urls.len();
    let mut summary = RunSummary::default();

    for (idx, url) in urls.iter().enumerate() {
        info!("[{:04}/{:04}] {}", idx + 1, total, url);
        summary.attempted += 1;

        let outcome = scrape(url).and_then(|page| sink.persist(&page));
        match outcome {
            Ok(()) => summary.succeeded += 1,
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                sink.log_failure(url, &err);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Iterates a URL list against one extraction profile, owning the browser
/// session for the duration of the crawl.
pub struct CrawlRunner<P: ExtractionProfile> {
    session: BrowserSession,
    profile: P,
    sink: OutputSink,
    options: RunnerOptions,
}

impl<P: ExtractionProfile> CrawlRunner<P> {
    pub fn new(
        session: BrowserSession,
        profile: P,
        options: RunnerOptions,
    ) -> Result<Self, ScrapeError> {
        let sink = OutputSink::new(&options.output_root, profile.kind())?;
        Ok(Self {
            session,
            profile,
            sink,
            options,
        })
    }

    /// Process every URL in order. The visit counter advances once per URL
    /// regardless of outcome, so session recycling stays on schedule even
    /// through a stretch of failing pages.
    pub fn run(&mut self, urls: &[String]) -> Result<RunSummary, ScrapeError> {
        let CrawlRunner {
            session,
            profile,
            sink,
            options,
        } = self;

        run_batch(urls, sink, |url| {
            let outcome = scrape_page(session, profile, options, url);
            session.record_visit()?;
            outcome
        })
    }
}

/// The per-url pipeline: validate, load, wait, interact, extract
fn scrape_page<P: ExtractionProfile>(
    session: &BrowserSession,
    profile: &P,
    options: &RunnerOptions,
    url: &str,
) -> Result<PageArtifacts, ScrapeError> {
    profile.validate_url(url)?;
    let slug = profile.slug(url);

    session.navigate(url)?;
    session.wait_for_ready(&profile.ready_condition())?;
    profile.prepare_page(session)?;

    let html = if options.save_html {
        Some(session.page_html()?)
    } else {
        None
    };

    let json = if options.save_json {
        let record = ScrapeRecord {
            name: slug.clone(),
            url: url.to_string(),
            profile: profile.extract(session)?,
        };
        Some(serde_json::to_value(&record)?)
    } else {
        None
    };

    Ok(PageArtifacts { slug, html, json })
}
