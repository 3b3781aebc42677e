//! Segmentation of loosely-structured clinical text into list topics.
//!
//! The classification backend returns analysis and conduct sections as free
//! text: sometimes one topic per line with bullet or number markers,
//! sometimes a single run-on line. `segment` turns either form into an
//! ordered list of clean topic strings for rendering. Total and
//! deterministic — bad input yields an empty list, never an error.

use std::sync::LazyLock;

use regex::Regex;

/// Which marker vocabulary the source text uses.
///
/// Clinical analysis arrives bulleted, recommended conduct arrives numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Bulleted,
    Numbered,
}

// Leading-marker strippers, applied per line in order.
static BULLETED_LINE_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?m)^\s*•\s*").unwrap(),
        Regex::new(r"(?m)^\s*\*\s*").unwrap(),
        Regex::new(r"(?m)^\s*\.\s*").unwrap(),
        Regex::new(r"(?m)^\s*-\s*").unwrap(),
    ]
});

static NUMBERED_LINE_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?m)^\s*\d+\.\s*").unwrap(),
        Regex::new(r"(?m)^\s*\d+\s*").unwrap(),
        Regex::new(r"(?m)^\s*\.\s*").unwrap(),
    ]
});

// Inline separators for single-line text.
static BULLET_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+•\s+").unwrap());
static NUMBER_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d+\.\s+").unwrap());
static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\s+").unwrap());

/// Split a clinical text block into ordered, trimmed, non-empty topics.
///
/// Leading markers are stripped from every line first. Text containing
/// newlines splits on them; single-line text splits on inline markers or on
/// a sentence boundary (period + whitespace + uppercase letter). Fragment
/// order is preserved and nothing is deduplicated.
pub fn segment(text: &str, style: ListStyle) -> Vec<String> {
    let markers = match style {
        ListStyle::Bulleted => &*BULLETED_LINE_MARKERS,
        ListStyle::Numbered => &*NUMBERED_LINE_MARKERS,
    };

    let mut cleaned = text.to_string();
    for marker in markers {
        cleaned = marker.replace_all(&cleaned, "").into_owned();
    }

    let fragments: Vec<&str> = if cleaned.contains('\n') {
        cleaned.split('\n').collect()
    } else {
        split_inline(&cleaned, style)
    };

    fragments
        .into_iter()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split single-line text on inline markers or sentence boundaries.
///
/// A sentence boundary only counts when the period + whitespace is followed
/// by an ASCII uppercase letter; the `regex` crate has no lookahead, so that
/// check is a manual scan. When a marker and a boundary compete for the same
/// position, the marker wins (mirrors alternation order).
fn split_inline(text: &str, style: ListStyle) -> Vec<&str> {
    let separator = match style {
        ListStyle::Bulleted => &*BULLET_SEPARATOR,
        ListStyle::Numbered => &*NUMBER_SEPARATOR,
    };

    let mut parts = Vec::new();
    let mut pos = 0;
    loop {
        let marker = separator.find_at(text, pos);
        let sentence = sentence_boundary_at(text, pos);

        let cut = match (marker, sentence) {
            (Some(m), Some((start, _))) if m.start() <= start => Some((m.start(), m.end())),
            (Some(m), None) => Some((m.start(), m.end())),
            (_, Some(boundary)) => Some(boundary),
            (None, None) => None,
        };

        match cut {
            Some((start, end)) => {
                parts.push(&text[pos..start]);
                pos = end;
                if pos >= text.len() {
                    break;
                }
            }
            None => {
                parts.push(&text[pos..]);
                break;
            }
        }
    }
    parts
}

/// First `period + whitespace` at or after `from` that is followed by an
/// ASCII uppercase letter. Returns the byte range of the separator itself.
fn sentence_boundary_at(text: &str, from: usize) -> Option<(usize, usize)> {
    let mut search = from;
    while let Some(m) = SENTENCE_BREAK.find_at(text, search) {
        if text[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
        {
            return Some((m.start(), m.end()));
        }
        search = m.end();
    }
    None
}
