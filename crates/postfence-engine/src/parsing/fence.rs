use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::language::Language;

/// Fenced code block delimiters and patterns.
///
/// Everything the parser knows about fence syntax lives here.
pub struct CodeFence;

impl CodeFence {
    pub const MARKER: &'static str = "```";

    /// Language recorded on a segment whose fence has no tag.
    pub const DEFAULT_LANGUAGE: &'static str = "text";

    /// Backticks, an optional bare tag, a line break, a lazily matched body
    /// and the closing backticks. A fence with no closing marker never
    /// matches and stays prose.
    pub fn pattern() -> &'static Regex {
        static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
        FENCE_REGEX.get_or_init(|| {
            Regex::new(r"(?s)```([A-Za-z0-9_-]*)\r?\n(.*?)```").expect("Invalid fence regex")
        })
    }

    /// Stricter pattern used for code-only extraction: the body must be
    /// non-empty and the closing marker must sit on its own line.
    fn extract_pattern() -> &'static Regex {
        static EXTRACT_REGEX: OnceLock<Regex> = OnceLock::new();
        EXTRACT_REGEX.get_or_init(|| {
            Regex::new(r"(?s)```([A-Za-z0-9_]+)?\n(.+?)\n```").expect("Invalid extract regex")
        })
    }

    /// Normalizes a captured fence tag: trimmed, lowercased, defaulted.
    pub fn language_tag(tag: &str) -> String {
        let tag = tag.trim();
        if tag.is_empty() {
            Self::DEFAULT_LANGUAGE.to_string()
        } else {
            tag.to_lowercase()
        }
    }
}

/// Pre-pass applied to user-submitted bodies before segmenting.
///
/// A fence marker at the very end of the body is moved onto its own line,
/// and the result is trimmed.
pub fn normalize_fences(raw: &str) -> String {
    let normalized = match raw.trim_end().strip_suffix(CodeFence::MARKER) {
        Some(before) => format!("{before}\n{}", CodeFence::MARKER),
        None => raw.to_string(),
    };
    normalized.trim().to_string()
}

/// A code block pulled out of a body without its surrounding prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedCode {
    pub language: Language,
    /// Body exactly as written between the fence lines.
    pub code: String,
}

/// Extracts only the fenced code blocks of `raw`.
///
/// Untagged blocks default to TypeScript here, unlike [`super::segment`]
/// which records the `"text"` filler and leaves the decision to the
/// classifier.
pub fn extract_code_blocks(raw: &str) -> Vec<ExtractedCode> {
    CodeFence::extract_pattern()
        .captures_iter(raw)
        .map(|caps| {
            let language = caps
                .get(1)
                .map_or(Language::TypeScript, |m| Language::from_tag(m.as_str()));
            let code = caps.get(2).map_or("", |m| m.as_str()).to_string();
            ExtractedCode { language, code }
        })
        .collect()
}
