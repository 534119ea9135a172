use serde::Serialize;

use super::span::Span;

/// One contiguous unit of a post body.
///
/// Both variants keep the span they were cut from. `content` is the
/// display-ready text: line-break artifacts next to fences are trimmed from
/// text, and code bodies are trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    /// Prose between (or around) fenced blocks. May contain `\n\n` breaks.
    Text { span: Span, content: String },
    /// A fenced code block.
    Code {
        /// Full span including both fence markers.
        span: Span,
        /// Fence tag trimmed and lowercased, `"text"` when absent.
        language: String,
        content: String,
    },
}

impl Segment {
    pub fn span(&self) -> Span {
        match self {
            Segment::Text { span, .. } | Segment::Code { span, .. } => *span,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Segment::Text { content, .. } | Segment::Code { content, .. } => content,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Segment::Code { .. })
    }
}
