// src/formatting/plain_text.rs
//! Plain-text rendering of rich-text spans.

use crate::api::responses::RichTextSpan;
use crate::constants::INDENT_UNIT;

/// Concatenates the text content of all spans.
///
/// Spans without a `text` object (mentions, equations) contribute nothing.
pub fn concat_spans(spans: &[RichTextSpan]) -> String {
    spans
        .iter()
        .filter_map(|span| span.text.as_ref())
        .map(|text| text.content.as_str())
        .collect()
}

/// Appends one flattened line: `depth` indent units, the text, a newline.
pub fn push_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT_UNIT);
    }
    out.push_str(text);
    out.push('\n');
}
