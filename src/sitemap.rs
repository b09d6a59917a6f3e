//! Sitemap URL list loading
//!
//! Crawls are driven by site-map-style XML documents: a root element whose
//! children are URL entries, each carrying the URL as the text of its first
//! child element (`<url><loc>...</loc></url>` in standard sitemaps). The
//! whole list is read into memory, in document order, before any browsing
//! starts.

use std::fs;
use std::path::Path;

use crate::error::ScrapeError;

/// Read a sitemap file into an ordered URL list
pub fn load_urls(path: &Path) -> Result<Vec<String>, ScrapeError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ScrapeError::Sitemap(format!("{}: {}", path.display(), e)))?;
    parse_urls(&text).map_err(|e| ScrapeError::Sitemap(format!("{}: {}", path.display(), e)))
}

fn parse_urls(text: &str) -> Result<Vec<String>, roxmltree::Error> {
    let doc = roxmltree::Document::parse(text)?;
    let mut urls = Vec::new();

    for entry in doc.root_element().children().filter(|n| n.is_element()) {
        let loc = entry
            .children()
            .find(|n| n.is_element())
            .and_then(|n| n.text());
        if let Some(url) = loc {
            let url = url.trim();
            if !url.is_empty() {
                urls.push(url.to_string());
            }
        }
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://www.coursera.org/learn/machine-learning</loc>
    <lastmod>2019-08-30</lastmod>
  </url>
  <url>
    <loc>https://www.coursera.org/learn/learning-how-to-learn</loc>
  </url>
  <url>
    <loc> https://www.coursera.org/learn/python </loc>
  </url>
</urlset>"#;

    #[test]
    fn parses_urls_in_document_order() {
        let urls = parse_urls(SITEMAP).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://www.coursera.org/learn/machine-learning",
                "https://www.coursera.org/learn/learning-how-to-learn",
                "https://www.coursera.org/learn/python",
            ]
        );
    }

    #[test]
    fn empty_urlset_yields_empty_list() {
        let urls = parse_urls(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"/>"#)
            .unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(parse_urls("<urlset><url>").is_err());
    }

    #[test]
    fn missing_file_is_a_sitemap_error() {
        let err = load_urls(Path::new("sitemap/does-not-exist.xml")).unwrap_err();
        assert!(matches!(err, ScrapeError::Sitemap(_)));
    }

    #[test]
    fn loads_urls_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.xml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(SITEMAP.as_bytes()).unwrap();

        let urls = load_urls(&path).unwrap();
        assert_eq!(urls.len(), 3);
    }
}
