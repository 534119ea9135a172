use crate::parsing::{CodeFence, Segment, trim_line_breaks};

/// Asserts the structural invariants of a segment sequence cut from `raw`.
///
/// Spans are non-empty, in bounds, ordered and non-overlapping; anything not covered by
/// a span is whitespace; text content is its span minus line-break
/// artifacts; code spans are delimited by fence markers and contain their
/// body. Panics with a description of the first violation.
pub fn check(raw: &str, segments: &[Segment]) {
    let n = raw.len();
    let mut cursor = 0;

    for s in segments {
        let span = s.span();
        assert!(
            span.start <= span.end && span.end <= n,
            "segment span out of bounds: {span:?} (raw len: {n})"
        );
        assert!(!span.is_empty(), "empty segment span: {span:?}");
        assert!(
            span.start >= cursor,
            "segment span overlaps previous segment: {span:?} starts before {cursor}"
        );

        let gap = &raw[cursor..span.start];
        assert!(
            gap.trim().is_empty(),
            "uncovered non-whitespace before {span:?}: {gap:?}"
        );

        let source = span.slice(raw);
        match s {
            Segment::Text { content, .. } => {
                assert!(!content.trim().is_empty(), "empty text segment at {span:?}");
                assert_eq!(
                    trim_line_breaks(source),
                    content.as_str(),
                    "text content does not match its span {span:?}"
                );
            }
            Segment::Code { content, language, .. } => {
                assert!(
                    span.len() >= 2 * CodeFence::MARKER.len(),
                    "code span too short to hold two fence markers: {span:?}"
                );
                assert!(
                    source.starts_with(CodeFence::MARKER) && source.ends_with(CodeFence::MARKER),
                    "code span is not fenced: {source:?}"
                );
                assert!(
                    source.contains(content.as_str()),
                    "code content not found in its span {span:?}"
                );
                assert!(!language.is_empty(), "code segment without language at {span:?}");
            }
        }

        cursor = span.end;
    }

    let tail = &raw[cursor..];
    assert!(
        tail.trim().is_empty(),
        "uncovered non-whitespace after last segment: {tail:?}"
    );
}
