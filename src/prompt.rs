use crate::core::models::SummaryType;

/// Number of characters of the document sent to the LLM.
pub const MAX_PROMPT_INPUT_CHARS: usize = 12_000;

/// Cut `text` to at most `max_chars` characters, never splitting a code point.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the single user prompt asking for the JSON summary shape.
#[must_use]
pub fn build_summary_prompt(text: &str, summary_type: SummaryType) -> String {
    let document = truncate_chars(text, MAX_PROMPT_INPUT_CHARS);
    format!(
        r#"Summarize the document into this JSON with short, precise bullets:
{{
  "purpose": "...",
  "insights": ["...", "..."],
  "risks": ["...", "..."],
  "next_steps": ["...", "..."]
}}
Constraints: U.S. English, numbered bullets where useful, no fluff. Summary type: {summary_type}.
Document:
{document}"#
    )
}
