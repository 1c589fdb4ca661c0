// src/naia/mod.rs
pub mod client;
pub mod models;
pub mod scraper;

pub use models::{ProcessedUrls, ScrapeOutcome, StandingRecord};
pub use scraper::StandingsScraper;
