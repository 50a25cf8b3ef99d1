//! Heuristic parsing of the reduce model's free-text output.
//!
//! The parser is line-positional: it trusts that the model answered the
//! reduce prompt roughly in order, with the short summary first and the
//! long summary on the following lines. No numbered headers are parsed,
//! even though the prompt asks for them; a future template version could
//! switch to labelled-section parsing. Malformed input degrades to empty
//! fields rather than failing.

/// Best-effort structured view over raw reduce output. Never fails;
/// empty fields mean a valid-but-low-quality outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedSummary {
    pub short: String,
    pub long: String,
    pub highlights: Vec<String>,
}

/// Extracts the short summary (first non-empty line), the long summary
/// (lines 2-4, joined with newlines) and up to 3 bullet highlights
/// (lines whose trimmed form starts with `-`), in document order.
pub fn parse_summary(raw: &str) -> ParsedSummary {
    let lines: Vec<&str> = raw.lines().collect();

    let short = lines
        .iter()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .unwrap_or_default();

    let long = lines
        .iter()
        .skip(1)
        .take(3)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    let highlights = lines
        .iter()
        .filter_map(|line| line.trim().strip_prefix('-'))
        .map(|rest| rest.trim().to_string())
        .take(3)
        .collect();

    ParsedSummary {
        short,
        long,
        highlights,
    }
}
