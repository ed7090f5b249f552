//! Deterministic summary used when no LLM is available.

use crate::core::models::SummaryResult;

pub const HEURISTIC_MODEL: &str = "heuristic";
pub const NO_SALIENT_LINES: &str = "No salient lines detected.";

const EDGE_LINES: usize = 3;
const MAX_INSIGHTS: usize = 5;

const PURPOSE: &str = "Summarize an uploaded document or pasted text into standard sections: purpose, insights, risks, next steps.";
const RISK: &str = "Not verified. Heuristic mode.";
const NEXT_STEPS: [&str; 3] = [
    "Provide clearer objectives.",
    "Flag key metrics to extract.",
    "Request LLM mode if available.",
];
const NOTE: &str = "LLM disabled or key missing.";

/// Non-empty lines of `text`, trimmed.
///
/// Besides `\n` and `\r\n`, a bare `\r`, the vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line and paragraph
/// separators all end a line.
#[must_use]
pub fn salient_lines(text: &str) -> Vec<&str> {
    text.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// First three lines followed by the last three, capped at five entries.
///
/// With fewer than three lines the tail is the whole set.
#[must_use]
pub fn boundary_insights(lines: &[&str]) -> Vec<String> {
    let head = &lines[..lines.len().min(EDGE_LINES)];
    let tail = if lines.len() >= EDGE_LINES {
        &lines[lines.len() - EDGE_LINES..]
    } else {
        lines
    };

    let insights: Vec<String> = head
        .iter()
        .chain(tail)
        .take(MAX_INSIGHTS)
        .map(|line| (*line).to_string())
        .collect();

    if insights.is_empty() {
        vec![NO_SALIENT_LINES.to_string()]
    } else {
        insights
    }
}

#[must_use]
pub fn heuristic_summary(text: &str) -> SummaryResult {
    let lines = salient_lines(text);

    SummaryResult {
        purpose: PURPOSE.to_string(),
        insights: boundary_insights(&lines),
        risks: vec![RISK.to_string()],
        next_steps: NEXT_STEPS.iter().map(ToString::to_string).collect(),
        notes: Some(vec![NOTE.to_string()]),
        model_used: HEURISTIC_MODEL.to_string(),
    }
}
