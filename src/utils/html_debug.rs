// src/utils/html_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::utils::error::AppError;

/// Patterns highlighted in the annotated copy of a standings page.
pub const STANDINGS_DEBUG_PATTERNS: [(&str, &str); 4] = [
    (r"<strong[^>]*>[^<]*Conference[^<]*</strong>", "conference"),
    (r"<strong[^>]*>[^<]{1,9}</strong>", "prefix"),
    (r"Individual Rankings", "rankings"),
    (r"\b[0-9]+\.\s+[A-Z]", "tournament"),
];

/// Saves a HTML snippet to a file with debug highlights
pub fn save_debug_html(html: &str, filename: &Path, highlights: &[(usize, usize, &str)]) -> Result<(), AppError> {
    let mut file = File::create(filename)?;

    // Add debug styling in head
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");

    // CSS for highlight colors
    debug_html.push_str(".highlight-conference { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-prefix { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-rankings { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-tournament { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    // Walk the highlights in document order, copying the text between them
    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0);

    for (start, end, highlight_type) in sorted_highlights {
        // Overlapping match, the earlier one wins
        if start < last_pos {
            continue;
        }
        // Add content before the highlight
        debug_html.push_str(&html[last_pos..start]);

        let css_class = match highlight_type {
            "conference" => "highlight-conference",
            "prefix" => "highlight-prefix",
            "rankings" => "highlight-rankings",
            "tournament" => "highlight-tournament",
            _ => "highlight-custom",
        };

        // Add the highlighted section with a marker
        debug_html.push_str(&format!("<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type));
        debug_html.push_str(&html[start..end]);
        debug_html.push_str("</span>");

        last_pos = end;
    }

    // Add any remaining content
    if last_pos < html.len() {
        debug_html.push_str(&html[last_pos..]);
    }

    debug_html.push_str("\n</body>\n</html>");

    // Write to file
    file.write_all(debug_html.as_bytes())?;

    tracing::info!("Saved debug HTML to {}", filename.display());
    Ok(())
}

/// Creates a debug version of an HTML document with locations of specified regex patterns highlighted
pub fn create_debug_html(html: &str, filename: &Path, patterns: &[(&str, &str)]) -> Result<(), AppError> {
    use regex::Regex;

    let mut highlights = Vec::new();

    // Find all matches for each pattern and add them to highlights
    for (pattern, highlight_type) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            AppError::Config(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    save_debug_html(html, filename, &highlights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotates_conference_headings_and_rankings_tail() {
        let html = "<p><strong>Cas</strong><strong>cade Conference</strong></p><p>1 A 20 Individual Rankings</p><p>1. Corban - 95</p>";
        let path = std::env::temp_dir().join(format!("naia_debug_{}.html", std::process::id()));

        create_debug_html(html, &path, &STANDINGS_DEBUG_PATTERNS).expect("debug html should be written");
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(written.contains("class=\"highlight-conference\""));
        assert!(written.contains("class=\"highlight-prefix\""));
        assert!(written.contains("class=\"highlight-rankings\""));
        assert!(written.contains("class=\"highlight-tournament\""));
        assert!(written.contains("cade Conference"));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let path = std::env::temp_dir().join("naia_debug_invalid.html");
        let result = create_debug_html("<p></p>", &path, &[("(unclosed", "custom")]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
