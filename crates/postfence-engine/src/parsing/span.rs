use serde::Serialize;

/// A byte range `[start, end)` into the raw content.
///
/// Segments store the span they were cut from so callers can slice the
/// original body and get the exact source text back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Byte length; an inverted span counts as zero.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Slices `raw` with this span.
    ///
    /// Returns an empty string if the span falls outside `raw` or off a char
    /// boundary rather than panicking.
    pub fn slice(self, raw: &str) -> &str {
        raw.get(self.start..self.end).unwrap_or("")
    }
}
