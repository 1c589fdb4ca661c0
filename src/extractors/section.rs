// src/extractors/section.rs

// --- Imports ---
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// --- Constants ---
const CONFERENCE_MARKER: &str = "Conference";
const INDIVIDUAL_RANKINGS_MARKER: &str = "Individual Rankings";
// A preceding heading shorter than this is a fragment of the current one.
const SPLIT_PREFIX_MAX_CHARS: usize = 10;
// Anything shorter cannot hold a single standings entry.
const MIN_STANDINGS_CHARS: usize = 10;

// --- CSS Selectors (Lazy Static) ---
static HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("strong").expect("Failed to compile HEADING_SELECTOR")
});

// --- Document Access ---

/// Read-only navigation over a parsed standings page.
pub trait StandingsDocument {
    type Node: Copy;

    /// Emphasized headings whose text contains `needle`, in document order.
    fn headings_containing(&self, needle: &str) -> Vec<Self::Node>;

    fn text_of(&self, node: Self::Node) -> String;

    /// Nearest preceding sibling heading, if any.
    fn previous_sibling_heading(&self, node: Self::Node) -> Option<Self::Node>;

    /// Nearest following sibling paragraph of the heading's parent block.
    fn next_sibling_paragraph(&self, node: Self::Node) -> Option<Self::Node>;

    /// First paragraph after the start of the heading's parent block,
    /// anywhere in the document.
    fn next_paragraph_anywhere(&self, node: Self::Node) -> Option<Self::Node>;
}

/// `StandingsDocument` over an HTML tree parsed by `scraper`.
pub struct HtmlPage<'a> {
    document: &'a Html,
}

impl<'a> HtmlPage<'a> {
    pub fn new(document: &'a Html) -> Self {
        Self { document }
    }

    fn parent_block(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        element.parent().and_then(ElementRef::wrap)
    }
}

impl<'a> StandingsDocument for HtmlPage<'a> {
    type Node = ElementRef<'a>;

    fn headings_containing(&self, needle: &str) -> Vec<ElementRef<'a>> {
        self.document
            .select(&HEADING_SELECTOR)
            .filter(|heading| self.text_of(*heading).contains(needle))
            .collect()
    }

    /// Each text node trimmed and glued together with no separator.
    fn text_of(&self, element: ElementRef<'a>) -> String {
        element
            .text()
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect()
    }

    fn previous_sibling_heading(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        element
            .prev_siblings()
            .filter_map(ElementRef::wrap)
            .find(|sibling| HEADING_SELECTOR.matches(sibling))
    }

    fn next_sibling_paragraph(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        Self::parent_block(element)?
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|sibling| sibling.value().name() == "p")
    }

    fn next_paragraph_anywhere(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let parent = Self::parent_block(element)?;

        // Pre-order traversal is document order.
        self.document
            .tree
            .root()
            .descendants()
            .skip_while(|node| node.id() != parent.id())
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|candidate| candidate.value().name() == "p")
    }
}

// --- Data Structures ---

/// Raw standings text found under one conference heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceBlock {
    pub conference_name: String,
    pub year: u32,
    pub raw_text: String,
}

// --- Extractor ---
#[derive(Debug, Default)]
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self { Self {} }

    /// Finds every conference heading and the block of standings text under it.
    ///
    /// `year` only stamps the output. Headings without usable standings text
    /// are skipped, so an empty result just means the page had no qualifying
    /// sections.
    pub fn extract<D: StandingsDocument>(&self, document: &D, year: u32) -> Vec<ConferenceBlock> {
        let headings = document.headings_containing(CONFERENCE_MARKER);
        tracing::info!("Found {} conference sections", headings.len());

        let mut blocks = Vec::new();
        for heading in headings {
            let conference_name = self.conference_name(document, heading);

            let Some(raw_text) = self.standings_text(document, heading) else {
                tracing::debug!("No standings paragraph for '{}'", conference_name);
                continue;
            };

            blocks.push(ConferenceBlock { conference_name, year, raw_text });
        }

        blocks
    }

    /// Parses `html` and runs `extract` over it.
    pub fn extract_from_html(&self, html: &str, year: u32) -> Vec<ConferenceBlock> {
        let document = Html::parse_document(html);
        self.extract(&HtmlPage::new(&document), year)
    }

    /// Heading text, with a short split-off prefix heading glued back on
    /// ("Cas" + "cade Conference"). Looks back one heading only.
    fn conference_name<D: StandingsDocument>(&self, document: &D, heading: D::Node) -> String {
        let name = document.text_of(heading);

        if let Some(previous) = document.previous_sibling_heading(heading) {
            let prefix = document.text_of(previous);
            if prefix.chars().count() < SPLIT_PREFIX_MAX_CHARS && !prefix.contains(CONFERENCE_MARKER) {
                tracing::trace!("Merging split heading '{}' + '{}'", prefix, name);
                return prefix + &name;
            }
        }

        name
    }

    fn standings_text<D: StandingsDocument>(&self, document: &D, heading: D::Node) -> Option<String> {
        let paragraph = document
            .next_sibling_paragraph(heading)
            .or_else(|| document.next_paragraph_anywhere(heading))?;

        let text = document.text_of(paragraph);
        let text = text.trim();

        // Another heading means this conference has no standings of its own.
        if text.contains(CONFERENCE_MARKER) || text.chars().count() < MIN_STANDINGS_CHARS {
            return None;
        }

        let text = match text.find(INDIVIDUAL_RANKINGS_MARKER) {
            Some(idx) => text[..idx].trim(),
            None => text,
        };

        Some(text.to_string())
    }
}
