//! PRD summary extraction.
//!
//! Pulls a one-paragraph project summary out of free-form PRD markdown.
//! Extraction is a fixed strategy chain; when no strategy yields text the
//! caller may fall back to a completion provider via
//! [`summarize_with`](crate::prd::summarize_with).

use std::sync::LazyLock;

use regex::Regex;

use crate::providers::{CompletionProvider, ProviderError};

/// Markdown heading line: `#` run plus title.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*$").expect("heading regex"));

const SUMMARY_SYSTEM_PROMPT: &str = "You summarize product requirements documents. \
Respond with a single short paragraph (2-3 sentences) describing what the project \
is and what it does. Respond with the paragraph only, no preamble or markdown.";

/// Extraction strategies, tried in order; first non-empty result wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// First paragraph under a `## Summary` heading (case-insensitive).
    SummarySection,
    /// First paragraph under a `## Overview` heading.
    OverviewSection,
    /// First non-heading paragraph anywhere in the document.
    FirstParagraph,
}

const STRATEGIES: [Strategy; 3] = [
    Strategy::SummarySection,
    Strategy::OverviewSection,
    Strategy::FirstParagraph,
];

impl Strategy {
    fn apply(self, document: &str) -> Option<String> {
        match self {
            Self::SummarySection => section_paragraph(document, "summary"),
            Self::OverviewSection => section_paragraph(document, "overview"),
            Self::FirstParagraph => first_paragraph(document),
        }
    }
}

/// Extract a one-paragraph summary from PRD text.
///
/// Returns `None` when no strategy yields non-empty text; deciding what
/// to do then (provider fallback or empty summary) is the caller's call.
pub fn extract_summary(document: &str) -> Option<String> {
    STRATEGIES.iter().find_map(|s| s.apply(document))
}

/// Ask a completion provider to summarize the document.
pub async fn summarize_with(
    provider: &dyn CompletionProvider,
    document: &str,
) -> Result<String, ProviderError> {
    let response = provider.complete(SUMMARY_SYSTEM_PROMPT, document).await?;
    Ok(response.trim().to_string())
}

/// First paragraph of the section opened by the named heading.
///
/// The paragraph runs from the first non-blank line after the heading up
/// to the next blank line or the next heading, whichever comes first.
fn section_paragraph(document: &str, title: &str) -> Option<String> {
    let mut lines = document.lines();
    for line in lines.by_ref() {
        if let Some(caps) = HEADING_RE.captures(line)
            && caps[2].eq_ignore_ascii_case(title)
        {
            // A heading before any text means the section is empty.
            return paragraph_from(&mut lines, false);
        }
    }
    None
}

/// First non-heading paragraph of the whole document.
fn first_paragraph(document: &str) -> Option<String> {
    let mut lines = document.lines();
    paragraph_from(&mut lines, true)
}

/// Collect the next paragraph from a line iterator: skip leading blank
/// lines, then join the following run of non-blank lines with single
/// spaces. A heading always ends a paragraph in progress; before one has
/// started it either gets skipped (`skip_headings`) or ends the search.
fn paragraph_from<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    skip_headings: bool,
) -> Option<String> {
    let mut collected: Vec<&str> = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if collected.is_empty() {
                continue;
            }
            break;
        }
        if HEADING_RE.is_match(trimmed) {
            if collected.is_empty() && skip_headings {
                continue;
            }
            break;
        }
        collected.push(trimmed);
    }
    if collected.is_empty() {
        None
    } else {
        Some(collected.join(" "))
    }
}
