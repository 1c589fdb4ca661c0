// src/naia/scraper.rs
use std::path::PathBuf;

use crate::extractors::{tokenize, SectionExtractor};
use crate::naia::client;
use crate::naia::models::{
    ProcessedUrls, ScrapeOutcome, StandingRecord, REASON_ALREADY_PROCESSED, REASON_FETCH_FAILED,
};
use crate::utils::html_debug::{create_debug_html, STANDINGS_DEBUG_PATTERNS};

/// Fetches a standings page and turns it into ranked records.
#[derive(Debug, Default)]
pub struct StandingsScraper {
    extractor: SectionExtractor,
    debug_dir: Option<PathBuf>,
}

impl StandingsScraper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the raw page and an annotated copy of every page scraped.
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    /// Scrapes `url` unless it is already in `processed`.
    /// A successful scrape adds the URL to `processed`; a failed one does not.
    pub async fn scrape(&self, url: &str, year: u32, processed: &mut ProcessedUrls) -> ScrapeOutcome {
        if processed.contains(url) {
            tracing::info!("URL already processed: {}", url);
            return ScrapeOutcome::Skipped {
                url: url.to_string(),
                reason: REASON_ALREADY_PROCESSED,
            };
        }

        tracing::info!("Scraping standings for {} from: {}", year, url);

        let html = match client::fetch_page(url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Failed to fetch page {}: {}", url, e);
                return ScrapeOutcome::Failed {
                    url: url.to_string(),
                    reason: REASON_FETCH_FAILED,
                    error: e.to_string(),
                };
            }
        };

        let records = self.scrape_html(&html, year);
        processed.insert(url);

        ScrapeOutcome::Success { url: url.to_string(), year, records }
    }

    /// Extracts and tokenizes every conference block of an already fetched page.
    pub fn scrape_html(&self, html: &str, year: u32) -> Vec<StandingRecord> {
        if let Some(dir) = &self.debug_dir {
            self.save_debug_copies(dir, html, year);
        }

        let mut records = Vec::new();
        for block in self.extractor.extract_from_html(html, year) {
            let entries = tokenize(&block.raw_text);
            tracing::info!("  {}: {} schools", block.conference_name, entries.len());

            records.extend(
                entries
                    .into_iter()
                    .map(|entry| StandingRecord::from_entry(entry, &block.conference_name, block.year)),
            );
        }

        records
    }

    fn save_debug_copies(&self, dir: &std::path::Path, html: &str, year: u32) {
        let dir = dir.join(year.to_string());
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!("Failed to create debug directory {}: {}", dir.display(), e);
            return;
        }

        let raw_path = dir.join("raw_page.html");
        match std::fs::write(&raw_path, html) {
            Ok(()) => tracing::info!("Saved raw page to: {}", raw_path.display()),
            Err(e) => tracing::warn!("Failed to save raw page: {}", e),
        }

        let annotated_path = dir.join("page_annotated.html");
        if let Err(e) = create_debug_html(html, &annotated_path, &STANDINGS_DEBUG_PATTERNS) {
            tracing::warn!("Failed to create debug HTML: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <p><strong>Heart of America Conference</strong></p>
        <p>1 Grand View 2162 Missouri Valley 1983</p>
        <p><strong>Cas</strong><strong>cade Conference</strong></p>
        <p>Corban - 95Eastern Oregon - 88 Individual Rankings 125: Smith - 1</p>
        <p><strong>Sooner Athletic Conference</strong></p>
        <p>1. Oklahoma City - 95.5 2. Lyon - 88</p>
        <p><strong>Kansas Conference</strong></p>
        <p>too short</p>
        </body></html>
    "#;

    fn record(rank: u32, school: &str, score: &str, conference: &str) -> StandingRecord {
        StandingRecord {
            rank,
            school: school.to_string(),
            score: score.to_string(),
            conference: conference.to_string(),
            year: 2024,
        }
    }

    #[test]
    fn test_scrape_html_handles_each_layout_per_block() {
        let records = StandingsScraper::new().scrape_html(PAGE, 2024);

        assert_eq!(records, vec![
            record(1, "Grand View", "216", "Heart of America Conference"),
            record(2, "Missouri Valley", "198", "Heart of America Conference"),
            record(1, "Corban", "95", "Cascade Conference"),
            record(2, "Eastern Oregon", "88", "Cascade Conference"),
            record(1, "Oklahoma City", "95.5", "Sooner Athletic Conference"),
            record(2, "Lyon", "88", "Sooner Athletic Conference"),
        ]);
    }

    #[test]
    fn test_scrape_html_is_repeatable() {
        let scraper = StandingsScraper::new();
        assert_eq!(scraper.scrape_html(PAGE, 2024), scraper.scrape_html(PAGE, 2024));
    }

    #[test]
    fn test_scrape_skips_processed_url_without_fetching() {
        let scraper = StandingsScraper::new();
        let mut processed = ProcessedUrls::new();
        processed.insert("https://standings.example/2024");

        let outcome = tokio_test::block_on(
            scraper.scrape("https://standings.example/2024", 2024, &mut processed),
        );

        assert!(matches!(outcome, ScrapeOutcome::Skipped { reason: REASON_ALREADY_PROCESSED, .. }));
        assert_eq!(processed.len(), 1);
    }

    #[test]
    fn test_failed_fetch_does_not_mark_url() {
        let scraper = StandingsScraper::new();
        let mut processed = ProcessedUrls::new();

        // Rejected by the client before any network access
        let outcome = tokio_test::block_on(scraper.scrape("not a url", 2024, &mut processed));

        assert!(matches!(outcome, ScrapeOutcome::Failed { reason: REASON_FETCH_FAILED, .. }));
        assert!(processed.is_empty());
    }

    #[test]
    fn test_debug_dir_receives_page_copies() {
        let dir = std::env::temp_dir().join(format!("naia_scraper_debug_{}", std::process::id()));
        let scraper = StandingsScraper::new().with_debug_dir(&dir);

        let records = scraper.scrape_html(PAGE, 2024);
        assert_eq!(records.len(), 6);
        assert!(dir.join("2024").join("raw_page.html").exists());
        assert!(dir.join("2024").join("page_annotated.html").exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
