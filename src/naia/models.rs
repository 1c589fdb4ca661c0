// src/naia/models.rs
use serde::Serialize;
use std::collections::BTreeSet;

use crate::extractors::StandingEntry;

/// One school's conference placement for a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingRecord {
    pub rank: u32,
    pub school: String,
    pub score: String,
    pub conference: String,
    pub year: u32,
}

impl StandingRecord {
    pub fn from_entry(entry: StandingEntry, conference: &str, year: u32) -> Self {
        Self {
            rank: entry.rank,
            school: entry.school,
            score: entry.score,
            conference: conference.to_string(),
            year,
        }
    }
}

pub const REASON_ALREADY_PROCESSED: &str = "already_processed";
pub const REASON_FETCH_FAILED: &str = "fetch_failed";

/// Result of scraping one URL.
#[derive(Debug)]
pub enum ScrapeOutcome {
    Success {
        url: String,
        year: u32,
        records: Vec<StandingRecord>,
    },
    Skipped {
        url: String,
        reason: &'static str,
    },
    Failed {
        url: String,
        reason: &'static str,
        error: String,
    },
}

/// URLs already scraped. Owned by the caller and handed to each scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedUrls {
    urls: BTreeSet<String>,
}

impl ProcessedUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Returns false if the URL was already present.
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        self.urls.insert(url.into())
    }

    pub fn clear(&mut self) {
        self.urls.clear();
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Sorted.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}

impl FromIterator<String> for ProcessedUrls {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self { urls: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processed_urls_dedup_and_order() {
        let mut processed = ProcessedUrls::new();
        assert!(processed.is_empty());
        assert!(processed.insert("https://b.example/2024"));
        assert!(processed.insert("https://a.example/2023"));
        assert!(!processed.insert("https://b.example/2024"));

        assert_eq!(processed.len(), 2);
        assert!(processed.contains("https://a.example/2023"));
        let urls: Vec<_> = processed.iter().collect();
        assert_eq!(urls, vec!["https://a.example/2023", "https://b.example/2024"]);

        processed.clear();
        assert!(processed.is_empty());
    }

    #[test]
    fn test_record_from_entry_stamps_conference_and_year() {
        let entry = StandingEntry { rank: 2, school: "Missouri Valley".to_string(), score: "198".to_string() };
        let record = StandingRecord::from_entry(entry, "Heart of America Conference", 2024);

        assert_eq!(record.rank, 2);
        assert_eq!(record.school, "Missouri Valley");
        assert_eq!(record.conference, "Heart of America Conference");
        assert_eq!(record.year, 2024);
    }
}
