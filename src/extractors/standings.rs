// src/extractors/standings.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

// --- Constants ---
// Layout cues always show up early in a block.
const FORMAT_SNIPPET_CHARS: usize = 100;
// Private separator for the run-on layout. Never appears in page text.
const RUN_ON_DELIMITER: char = '\u{1F}';

// --- Regex Patterns (Lazy Static) ---
// A rank abuts the next school's capitalized name: "2162 Missouri"
static RUN_ON_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9])\s+([A-Z])").expect("Failed to compile RUN_ON_BOUNDARY_RE")
});

// "Grand View 2162" -> ("Grand View", "2162")
static RUN_ON_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s+([0-9]{2,4})$").expect("Failed to compile RUN_ON_ENTRY_RE")
});

static DASH_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]+\.?[0-9]*").expect("Failed to compile DASH_NUMBER_RE")
});

// "1. Grand View - 95" at the very start of the block
static TOURNAMENT_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+\.\s+\w").expect("Failed to compile TOURNAMENT_START_RE")
});

static TOURNAMENT_RANK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]+\.\s+").expect("Failed to compile TOURNAMENT_RANK_RE")
});

static TOURNAMENT_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s*-\s*([0-9]+\.?[0-9]*)$").expect("Failed to compile TOURNAMENT_ENTRY_RE")
});

// --- Data Structures ---

/// Text layout of one conference block. Chosen per block, never per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// `1 School1 2162 School2 1983 ...`
    NumericRunOn,
    /// `School1 - 95School2 - 88 ...`
    DashSeparated,
    /// `1. School1 - 95 2. School2 - 88 ...`
    DashSeparatedNumberedTournament,
}

/// One school's placement as recovered from a block, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingEntry {
    pub rank: u32,
    pub school: String,
    /// Original numeric formatting is kept ("95.5", "216").
    pub score: String,
}

/// Picks the layout of a block from its leading text.
pub fn classify(text: &str) -> FormatKind {
    let snippet: String = text.chars().take(FORMAT_SNIPPET_CHARS).collect();

    if !snippet.contains(" - ") {
        return FormatKind::NumericRunOn;
    }

    if TOURNAMENT_START_RE.is_match(text.trim()) {
        FormatKind::DashSeparatedNumberedTournament
    } else {
        FormatKind::DashSeparated
    }
}

/// Decomposes one block of standings text into ordered entries.
///
/// Never fails: fragments that fit no record shape are dropped, so an
/// unparseable block simply yields an empty vector.
pub fn tokenize(text: &str) -> Vec<StandingEntry> {
    let kind = classify(text);
    tracing::trace!("Tokenizing {} chars as {:?}", text.len(), kind);

    match kind {
        FormatKind::NumericRunOn => tokenize_run_on(text),
        FormatKind::DashSeparated => tokenize_dash(text),
        FormatKind::DashSeparatedNumberedTournament => tokenize_tournament(text),
    }
}

fn is_bare_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn next_rank(entries: &[StandingEntry]) -> u32 {
    entries.len() as u32 + 1
}

/// Run-on layout, parsed with one token of lookback: a bare digit entry
/// is the rank of the entry that follows it.
fn tokenize_run_on(text: &str) -> Vec<StandingEntry> {
    let replacement = format!("${{1}}{}${{2}}", RUN_ON_DELIMITER);
    let delimited = RUN_ON_BOUNDARY_RE.replace_all(text, replacement.as_str());

    let mut entries = Vec::new();
    let mut pending_rank: Option<&str> = None;

    for token in delimited.split(RUN_ON_DELIMITER).map(str::trim).filter(|t| !t.is_empty()) {
        if is_bare_digits(token) {
            pending_rank = Some(token);
            continue;
        }

        let lookback = pending_rank.take();

        let Some(caps) = RUN_ON_ENTRY_RE.captures(token) else {
            tracing::trace!("Dropping run-on fragment '{}'", token);
            continue;
        };

        let school = caps[1].trim();
        let combo = &caps[2];

        let rank = lookback
            .and_then(|digits| digits.parse::<u32>().ok())
            .filter(|rank| *rank > 0)
            .unwrap_or_else(|| next_rank(&entries));

        // Four digits: three of score, then the next school's rank.
        let score = if combo.len() == 4 { &combo[..3] } else { combo };

        entries.push(StandingEntry {
            rank,
            school: school.to_string(),
            score: score.to_string(),
        });
    }

    entries
}

/// Splits `text` around every numeric run, keeping the runs as tokens.
fn split_keeping_numbers(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut last = 0;

    for mat in DASH_NUMBER_RE.find_iter(text) {
        parts.push(&text[last..mat.start()]);
        parts.push(mat.as_str());
        last = mat.end();
    }
    parts.push(&text[last..]);

    parts
}

fn tokenize_dash(text: &str) -> Vec<StandingEntry> {
    let tokens: Vec<&str> = split_keeping_numbers(text)
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != "-")
        .collect();

    let mut entries = Vec::new();

    // An unpaired trailing token is dropped.
    for pair in tokens.chunks_exact(2) {
        let school = pair[0].trim_end_matches([' ', '-']).trim();
        if school.is_empty() {
            continue;
        }

        let rank = next_rank(&entries);
        entries.push(StandingEntry {
            rank,
            school: school.to_string(),
            score: pair[1].to_string(),
        });
    }

    entries
}

fn tokenize_tournament(text: &str) -> Vec<StandingEntry> {
    let mut entries = Vec::new();

    for segment in TOURNAMENT_RANK_RE.split(text).map(str::trim).filter(|s| !s.is_empty()) {
        let Some(caps) = TOURNAMENT_ENTRY_RE.captures(segment) else {
            tracing::trace!("Dropping tournament fragment '{}'", segment);
            continue;
        };

        let school = caps[1].trim();
        if school.is_empty() {
            continue;
        }

        // Explicit rank markers were consumed as delimiters.
        let rank = next_rank(&entries);
        entries.push(StandingEntry {
            rank,
            school: school.to_string(),
            score: caps[2].to_string(),
        });
    }

    entries
}
