// src/extractors/mod.rs
pub mod section;
pub mod standings;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use section::{
    ConferenceBlock,
    HtmlPage,
    SectionExtractor,
    StandingsDocument,
};
#[allow(unused_imports)]
pub use standings::{
    classify,
    tokenize,
    FormatKind,
    StandingEntry,
};
