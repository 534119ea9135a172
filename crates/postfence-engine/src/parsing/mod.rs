pub mod fence;
pub mod invariants;
pub mod segment;
pub mod span;

pub use fence::{CodeFence, ExtractedCode, extract_code_blocks, normalize_fences};
pub use segment::Segment;
pub use span::Span;

/// Splits a post body into prose and fenced code segments, in document order.
///
/// Total over any input: an unterminated fence is left as prose, and empty or
/// whitespace-only input yields no segments. Text gaps that are only
/// whitespace (including the gap between two adjacent fences) are dropped.
pub fn segment(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in CodeFence::pattern().captures_iter(raw) {
        let Some(full) = caps.get(0) else {
            continue;
        };

        push_text(raw, Span::new(last_end, full.start()), &mut segments);

        let tag = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());
        segments.push(Segment::Code {
            span: Span::new(full.start(), full.end()),
            language: CodeFence::language_tag(tag),
            content: body.trim().to_string(),
        });

        last_end = full.end();
    }

    push_text(raw, Span::new(last_end, raw.len()), &mut segments);

    log::trace!(
        "segmented {} bytes into {} segments ({} code)",
        raw.len(),
        segments.len(),
        segments.iter().filter(|s| s.is_code()).count()
    );

    segments
}

/// Segments `raw` after running the [`normalize_fences`] pre-pass.
pub fn parse_filtered(raw: &str) -> Vec<Segment> {
    segment(&normalize_fences(raw))
}

fn push_text(raw: &str, span: Span, segments: &mut Vec<Segment>) {
    if span.is_empty() {
        return;
    }
    let content = trim_line_breaks(span.slice(raw));
    if content.trim().is_empty() {
        return;
    }
    segments.push(Segment::Text {
        span,
        content: content.to_string(),
    });
}

/// Strips the blank-line artifacts left next to fences, keeping indentation.
pub(crate) fn trim_line_breaks(text: &str) -> &str {
    text.trim_matches(['\r', '\n'])
}
